// file: src/config/nixos.rs
// version: 1.0.0
// guid: 9d5b30c7-26e8-4f41-b8a9-04c1e72d6f83

//! Declarative system configuration generator
//!
//! Builds the configuration.nix document written to the mounted target
//! filesystem. The renderer is a pure function of the resolved config and
//! the fetched key list; all interpolated values pass through the Nix
//! string escaper so hostnames and key text can never break document
//! syntax.

use super::{BootMode, BootstrapConfig};
use std::fmt::Write;

/// NixOS state version pinned into the generated document
pub const STATE_VERSION: &str = "24.05";

/// TCP port opened in the firewall for administrative access
pub const SSH_PORT: u16 = 22;

/// Minimal package set installed on the bootstrapped system
pub const BASE_PACKAGES: [&str; 4] = ["vim", "git", "curl", "htop"];

/// Render the configuration.nix document
///
/// Blank key lines are dropped; the remaining keys appear in fetch order,
/// one quoted entry each.
pub fn render(config: &BootstrapConfig, keys: &[String]) -> String {
    let mut doc = String::new();

    // Infallible: writing into a String cannot error.
    let _ = writeln!(doc, "# Generated by nixos-bootstrap {}.", crate::VERSION);
    let _ = writeln!(doc, "# Hand-off point for configuration management; edits survive until the");
    let _ = writeln!(doc, "# first management run replaces this file.");
    doc.push_str("{ config, pkgs, ... }:\n\n{\n");
    doc.push_str("  imports = [ ./hardware-configuration.nix ];\n\n");

    match config.boot_mode {
        BootMode::Uefi => {
            doc.push_str("  boot.loader.systemd-boot.enable = true;\n");
            doc.push_str("  boot.loader.efi.canTouchEfiVariables = true;\n");
        }
        BootMode::Legacy => {
            doc.push_str("  boot.loader.grub.enable = true;\n");
            let _ = writeln!(doc, "  boot.loader.grub.device = \"{}\";", escape(&config.disk));
        }
    }

    doc.push('\n');
    let _ = writeln!(doc, "  networking.hostName = \"{}\";", escape(&config.hostname));
    let _ = writeln!(doc, "  time.timeZone = \"{}\";", escape(&config.timezone));
    let _ = writeln!(doc, "  i18n.defaultLocale = \"{}\";", escape(&config.locale));

    doc.push_str("\n  networking.useDHCP = true;\n\n");

    doc.push_str("  services.openssh = {\n");
    doc.push_str("    enable = true;\n");
    doc.push_str("    settings = {\n");
    doc.push_str("      PermitRootLogin = \"prohibit-password\";\n");
    doc.push_str("      PasswordAuthentication = false;\n");
    doc.push_str("      KbdInteractiveAuthentication = false;\n");
    doc.push_str("    };\n");
    doc.push_str("  };\n\n");

    doc.push_str("  users.users.root.openssh.authorizedKeys.keys = [\n");
    for key in keys.iter().map(|k| k.trim()).filter(|k| !k.is_empty()) {
        let _ = writeln!(doc, "    \"{}\"", escape(key));
    }
    doc.push_str("  ];\n\n");

    let _ = writeln!(doc, "  networking.firewall.allowedTCPPorts = [ {} ];", SSH_PORT);

    doc.push('\n');
    let _ = writeln!(
        doc,
        "  environment.systemPackages = with pkgs; [ {} ];",
        BASE_PACKAGES.join(" ")
    );

    doc.push_str("\n  nix.settings.experimental-features = [ \"nix-command\" \"flakes\" ];\n\n");
    let _ = writeln!(doc, "  system.stateVersion = \"{}\";", STATE_VERSION);
    doc.push_str("}\n");

    doc
}

/// Escape a value for inclusion in a Nix double-quoted string
///
/// Covers the characters that terminate or interpolate inside `"..."`:
/// backslash, double quote, `${`, and newline.
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '$' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push_str("\\${");
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BootstrapConfig;

    fn test_config(boot_mode: BootMode) -> BootstrapConfig {
        BootstrapConfig {
            disk: "/dev/sda".to_string(),
            hostname: "node1".to_string(),
            swap_size: "8GiB".to_string(),
            boot_size: "512MiB".to_string(),
            boot_mode,
            timezone: "UTC".to_string(),
            locale: "en_US.UTF-8".to_string(),
            key_user: "ops".to_string(),
            reboot_delay: 5,
        }
    }

    #[test]
    fn test_escape_passthrough() {
        assert_eq!(escape("ssh-ed25519 AAAAC3Nza host"), "ssh-ed25519 AAAAC3Nza host");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("a\"b"), "a\\\"b");
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("a\nb"), "a\\nb");
        assert_eq!(escape("a${evil}b"), "a\\${evil}b");
        // A bare dollar sign is legal inside a Nix string
        assert_eq!(escape("a$b"), "a$b");
    }

    #[test]
    fn test_render_uefi_loader_stanza() {
        let doc = render(&test_config(BootMode::Uefi), &["ssh-ed25519 AAA".to_string()]);
        assert!(doc.contains("boot.loader.systemd-boot.enable = true;"));
        assert!(doc.contains("boot.loader.efi.canTouchEfiVariables = true;"));
        assert!(!doc.contains("grub"));
    }

    #[test]
    fn test_render_legacy_loader_stanza() {
        let doc = render(&test_config(BootMode::Legacy), &["ssh-ed25519 AAA".to_string()]);
        assert!(doc.contains("boot.loader.grub.enable = true;"));
        assert!(doc.contains("boot.loader.grub.device = \"/dev/sda\";"));
        assert!(!doc.contains("systemd-boot"));
    }

    #[test]
    fn test_render_key_entries_skip_blanks_keep_order() {
        let keys = vec![
            "ssh-ed25519 AAA first".to_string(),
            "".to_string(),
            "   ".to_string(),
            "ssh-rsa BBB second".to_string(),
        ];
        let doc = render(&test_config(BootMode::Uefi), &keys);

        let quoted: Vec<&str> = doc
            .lines()
            .filter(|line| line.trim_start().starts_with("\"ssh-"))
            .collect();
        assert_eq!(quoted.len(), 2);
        assert!(quoted[0].contains("first"));
        assert!(quoted[1].contains("second"));
    }

    #[test]
    fn test_render_escapes_untrusted_values() {
        let mut config = test_config(BootMode::Uefi);
        config.hostname = "evil\"; # injected".to_string();
        let keys = vec!["ssh-rsa AAA ${user}@host".to_string()];
        let doc = render(&config, &keys);

        assert!(doc.contains("networking.hostName = \"evil\\\"; # injected\";"));
        assert!(doc.contains("\"ssh-rsa AAA \\${user}@host\""));
    }

    #[test]
    fn test_render_fixed_stanzas() {
        let doc = render(&test_config(BootMode::Uefi), &["k".to_string()]);
        assert!(doc.contains("PermitRootLogin = \"prohibit-password\";"));
        assert!(doc.contains("PasswordAuthentication = false;"));
        assert!(doc.contains("KbdInteractiveAuthentication = false;"));
        assert!(doc.contains("networking.firewall.allowedTCPPorts = [ 22 ];"));
        assert!(doc.contains("networking.useDHCP = true;"));
        assert!(doc.contains("system.stateVersion = \"24.05\";"));
        assert!(doc.contains("experimental-features"));
        assert!(doc.ends_with("}\n"));
    }
}
