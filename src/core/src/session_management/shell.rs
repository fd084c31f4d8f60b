//! Canned command interpreter of the fake legacy shell.
//!
//! Commands are matched by prefix against a fixed, ordered table; the first entry wins. Nothing
//! is executed, every command only produces static text.

use super::transport::Transport;

pub const CLEAR_SCREEN: &str = "\x1b[2J";
pub const SHELL_PROMPT: &str = "C:\\users\\default>";
pub const LOGIN_BANNER: &str =
    "Microsoft(R) Windows NT(TM)\r\n(c) Copyright 1985-1993 Microsoft Corp.\r\n\r\n";

const HELP_TEXT: &str = "Available commands are: \r\n help cls cd dir hostname type exit\r\n";
const DIR_LISTING: &str = concat!(
    " Datenträger in Laufwerk C: ist System\r\n",
    " Volumeseriennummer: A2F7-732F\r\n\r\n",
    " Verzeichnis von c:\\users\\default\r\n\r\n",
    "13.04.1997  11:41\t<DIR>\t\t  .\r\n",
    "21.01.2000  11:41\t<DIR>\t\t  ..\r\n",
    "26.07.2003  11:41\t<DIR>\t\t  pass.txt\r\n",
);
const BAIT_FILE: &str = "pass.txt";
const BAIT_CONTENT: &str = "Administrator:admin\r\ndefault:\r\n";
const FILE_NOT_FOUND: &str = "File not found.\r\n";
const FAREWELL: &str = "Goodbye.\r\n";
const DEVICE_NOT_READY: &str = "Device not ready: I/O Error.\r\n";
const INVALID_APPLICATION: &str = "command.com: Not a valid Win32 application\r\n";
const COMMAND_NOT_FOUND: &str = "command.com: Command not found.\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    Help,
    Cls,
    Dir,
    Hostname,
    Type,
    Exit,
    Cd,
    Unknown,
}

const COMMAND_TABLE: [(&str, ShellCommand); 7] = [
    ("help", ShellCommand::Help),
    ("cls", ShellCommand::Cls),
    ("dir", ShellCommand::Dir),
    ("hostname", ShellCommand::Hostname),
    ("type", ShellCommand::Type),
    ("exit", ShellCommand::Exit),
    ("cd", ShellCommand::Cd),
];

impl ShellCommand {
    /// Resolves an already normalised (trimmed, lower-cased) command line.
    pub fn parse(command: &str) -> Self {
        COMMAND_TABLE
            .iter()
            .find(|(prefix, _)| command.starts_with(prefix))
            .map(|(_, cmd)| *cmd)
            .unwrap_or(ShellCommand::Unknown)
    }
}

/// Writes the response to `command` and, unless the user left, the next prompt.
///
/// `exit` asks the transport to close instead of prompting again.
pub fn execute(command: &str, hostname: &str, transport: &mut dyn Transport) {
    match ShellCommand::parse(command) {
        ShellCommand::Help => transport.write(HELP_TEXT),
        ShellCommand::Cls => transport.write(CLEAR_SCREEN),
        ShellCommand::Dir => transport.write(DIR_LISTING),
        ShellCommand::Hostname => transport.write(&format!("{}\r\n", hostname)),
        ShellCommand::Type => {
            if command.contains(BAIT_FILE) {
                transport.write(BAIT_CONTENT);
            } else {
                transport.write(FILE_NOT_FOUND);
            }
        }
        ShellCommand::Exit => {
            transport.write(FAREWELL);
            transport.close();
            return;
        }
        ShellCommand::Cd => transport.write(DEVICE_NOT_READY),
        ShellCommand::Unknown => {
            if command.contains(".exe") || command.contains(".com") {
                transport.write(INVALID_APPLICATION);
            } else {
                transport.write(COMMAND_NOT_FOUND);
            }
        }
    }

    transport.write(&format!("\r\n{}", SHELL_PROMPT));
}
