//! Shell completion generation.

use std::io;

use clap::Command;
use clap_complete::{generate, Shell};

/// Write the completion script for `shell` to `out`.
pub fn generate_completion(cmd: &mut Command, shell: Shell, out: &mut dyn io::Write) {
    generate(shell, cmd, "strassen", out);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> Command {
        Command::new("strassen")
            .subcommand(Command::new("bench"))
            .subcommand(Command::new("multiply"))
    }

    #[test]
    fn bash_completion_mentions_subcommands() {
        let mut buf = Vec::new();
        generate_completion(&mut command(), Shell::Bash, &mut buf);
        let script = String::from_utf8(buf).unwrap();
        assert!(script.contains("strassen"));
        assert!(script.contains("multiply"));
    }

    #[test]
    fn zsh_completion_is_not_empty() {
        let mut buf = Vec::new();
        generate_completion(&mut command(), Shell::Zsh, &mut buf);
        assert!(!buf.is_empty());
    }
}
