//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::{ColoredString, Colorize};
use itertools::Itertools;

use crate::domain::Tier;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print a labelled value line
pub fn field(label: &str, msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{:<22} {}", format!("{}:", label), msg);
}

/// Rupiah amount with Indonesian thousands grouping, e.g. `Rp5.000.000`
pub fn rupiah(amount: u128) -> String {
    let digits = amount.to_string();
    let grouped = digits
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap())
        .join(".");
    format!("Rp{}", grouped)
}

/// Signed Rupiah amount, for net results
pub fn rupiah_signed(amount: i128) -> String {
    if amount < 0 {
        format!("-{}", rupiah(amount.unsigned_abs()))
    } else {
        rupiah(amount as u128)
    }
}

/// Tier label in its plan color
pub fn tier_label(tier: Tier) -> ColoredString {
    match tier {
        Tier::None => tier.to_string().normal(),
        Tier::Green => tier.to_string().green(),
        Tier::Silver => tier.to_string().blue(),
        Tier::Red => tier.to_string().red(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_amounts_when_formatted_then_grouped_with_dots() {
        assert_eq!(rupiah(0), "Rp0");
        assert_eq!(rupiah(999), "Rp999");
        assert_eq!(rupiah(5_000_000), "Rp5.000.000");
        assert_eq!(rupiah(1_234_567_890), "Rp1.234.567.890");
    }

    #[test]
    fn given_negative_net_when_formatted_then_sign_leads() {
        assert_eq!(rupiah_signed(-1_500_000), "-Rp1.500.000");
        assert_eq!(rupiah_signed(42), "Rp42");
    }
}
