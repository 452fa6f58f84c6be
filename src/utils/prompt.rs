// file: src/utils/prompt.rs
// version: 1.0.0
// guid: d47a10f2-8c65-4b39-a580-3e92d61c0b47

//! Interactive confirmation gate
//!
//! Shows every resolved configuration value and demands a literal "yes"
//! before the pipeline is allowed to touch the disk. Anything else counts
//! as a decline, which is a clean exit, not an error.

use crate::config::BootstrapConfig;
use crate::Result;
use std::io::{self, Write};

/// Present the run summary and ask for confirmation
///
/// Returns `Ok(true)` only on an affirmative response.
pub fn confirm_destruction(config: &BootstrapConfig, key_count: usize) -> Result<bool> {
    println!();
    println!("About to bootstrap NixOS with the following settings:");
    println!("  disk:          {}", config.disk);
    println!("  hostname:      {}", config.hostname);
    println!("  boot mode:     {}", config.boot_mode);
    println!("  boot size:     {}", config.boot_size);
    println!("  swap size:     {}", config.swap_size);
    println!("  timezone:      {}", config.timezone);
    println!("  locale:        {}", config.locale);
    println!("  key user:      {} ({} key(s))", config.key_user, key_count);
    println!();
    println!("WARNING: this will DESTROY ALL DATA on {}!", config.disk);
    print!("Type 'yes' to continue: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(is_affirmative(&input))
}

/// Whether a confirmation response counts as affirmative
pub fn is_affirmative(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("YES\n"));
        assert!(is_affirmative("  Yes  "));
    }

    #[test]
    fn test_is_not_affirmative() {
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
        assert!(!is_affirmative("y"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative("yes please"));
    }
}
