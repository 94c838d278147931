//! Operator input used when no credentials file is present.

use console::Term;
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

pub trait Prompter {
    /// Reads one line with the typed text echoed back.
    fn read_line(&mut self, prompt: &str) -> io::Result<String>;

    /// Reads one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> io::Result<String>;
}

/// Prompts on a terminal device opened by path, so it still reaches the
/// operator while stdin and stderr are redirected, as they are for a build
/// script.
pub struct TerminalPrompter {
    input: BufReader<File>,
    output: File,
    term: Term,
}

impl TerminalPrompter {
    #[cfg(unix)]
    pub fn open(device: &Path) -> io::Result<Self> {
        use std::io::IsTerminal;

        let tty = OpenOptions::new().read(true).write(true).open(device)?;
        if !tty.is_terminal() {
            return Err(io::Error::other(format!(
                "{} is not a terminal",
                device.display()
            )));
        }
        // masked reads go through the controlling terminal
        let term = Term::read_write_pair(tty.try_clone()?, tty.try_clone()?);
        Ok(Self {
            output: tty.try_clone()?,
            input: BufReader::new(tty),
            term,
        })
    }

    #[cfg(windows)]
    pub fn open(device: &Path) -> io::Result<Self> {
        let input = OpenOptions::new().read(true).write(true).open(device)?;
        let output = OpenOptions::new().read(true).write(true).open("CONOUT$")?;
        Ok(Self {
            input: BufReader::new(input),
            output,
            term: Term::stderr(),
        })
    }

    fn ask(&mut self, prompt: &str) -> io::Result<()> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)?;
        read_answer(&mut self.input, prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.ask(prompt)?;
        if self.term.is_term() {
            self.term.read_secure_line()
        } else {
            log::warn!("cannot hide input on this console, the password will be echoed");
            read_answer(&mut self.input, prompt)
        }
    }
}

/// Reads answers line by line from any reader, e.g. piped stdin.
/// Nothing is masked: there is no terminal to mask.
pub struct ReaderPrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> ReaderPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn next_line(&mut self, prompt: &str) -> io::Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;
        read_answer(&mut self.input, prompt)
    }
}

impl ReaderPrompter<io::StdinLock<'static>, io::Stderr> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for ReaderPrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        self.next_line(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.next_line(prompt)
    }
}

/// The terminal when one can be opened, stdin otherwise.
pub enum OperatorPrompter {
    Terminal(TerminalPrompter),
    Stdin(ReaderPrompter<io::StdinLock<'static>, io::Stderr>),
}

impl OperatorPrompter {
    /// `terminal` is the device to prompt on; `None` goes straight to stdin.
    pub fn detect(terminal: Option<&Path>) -> Self {
        let opened = match terminal {
            Some(device) => TerminalPrompter::open(device),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                "terminal prompting is disabled",
            )),
        };
        match opened {
            Ok(terminal) => OperatorPrompter::Terminal(terminal),
            Err(err) => {
                log::debug!("no terminal ({err}), reading answers from stdin");
                OperatorPrompter::Stdin(ReaderPrompter::stdin())
            }
        }
    }
}

impl Prompter for OperatorPrompter {
    fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        match self {
            OperatorPrompter::Terminal(p) => p.read_line(prompt),
            OperatorPrompter::Stdin(p) => p.read_line(prompt),
        }
    }

    fn read_secret(&mut self, prompt: &str) -> io::Result<String> {
        match self {
            OperatorPrompter::Terminal(p) => p.read_secret(prompt),
            OperatorPrompter::Stdin(p) => p.read_secret(prompt),
        }
    }
}

/// One answer without its line terminator. EOF before any input is an error.
fn read_answer<R: BufRead + ?Sized>(input: &mut R, prompt: &str) -> io::Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("input ended before answering {prompt:?}"),
        ));
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}
