//! Replay scripts.
//!
//! One command per line, `#` starts a comment:
//!
//! ```text
//! press 3 4      # press row 3 col 4
//! wait 50        # advance the clock by 50 ms
//! release 3 4
//! tap 0 1        # press and release
//! reboot         # power cycle, persisted settings are kept
//! show           # print the resolved keymap
//! layers         # print the layer stack
//! ```

use anyhow::{Context, Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Command {
    Press(u8, u8),
    Release(u8, u8),
    Tap(u8, u8),
    Wait(u64),
    Reboot,
    Show,
    Layers,
}

/// Parse a script, returning each command with its line number
pub(crate) fn parse_script(source: &str) -> Result<Vec<(usize, Command)>> {
    let mut commands = Vec::new();
    for (index, line) in source.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let command = parse_command(line).with_context(|| format!("line {}: '{}'", index + 1, line))?;
        commands.push((index + 1, command));
    }
    Ok(commands)
}

fn parse_command(line: &str) -> Result<Command> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let command = match words.as_slice() {
        ["press", row, col] => Command::Press(row.parse()?, col.parse()?),
        ["release", row, col] => Command::Release(row.parse()?, col.parse()?),
        ["tap", row, col] => Command::Tap(row.parse()?, col.parse()?),
        ["wait", ms] => Command::Wait(ms.parse()?),
        ["reboot"] => Command::Reboot,
        ["show"] => Command::Show,
        ["layers"] => Command::Layers,
        _ => bail!("Unknown command"),
    };
    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = "\
# switch to dvorak
press 3 4
wait 20   # hold lower

tap 0 1
release 3 4
reboot
show
layers
";
        assert_eq!(
            parse_script(script).unwrap(),
            vec![
                (2, Command::Press(3, 4)),
                (3, Command::Wait(20)),
                (5, Command::Tap(0, 1)),
                (6, Command::Release(3, 4)),
                (7, Command::Reboot),
                (8, Command::Show),
                (9, Command::Layers),
            ]
        );
    }

    #[test]
    fn test_invalid_commands() {
        assert!(parse_script("press 1").is_err());
        assert!(parse_script("press 1 x").is_err());
        assert!(parse_script("tap 300 1").is_err());
        assert!(parse_script("jump").is_err());
    }
}
