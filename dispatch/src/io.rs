//! Output and input handles passed to command handlers.
//!
//! The dispatcher never looks at what goes through these; it only hands them
//! to the command being run. Colour tags, cursor control, and raw keypress
//! reading are left to richer implementations of the traits.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// Line-oriented output sink.
pub trait Output {
    /// Writes text without a trailing newline.
    fn write(&mut self, text: &str) -> io::Result<()>;

    /// Writes `count` newlines.
    fn newline(&mut self, count: usize) -> io::Result<()> {
        self.write(&"\n".repeat(count))
    }

    /// Writes a line followed by a newline.
    fn writeln(&mut self, line: &str) -> io::Result<()> {
        self.write(line)?;
        self.newline(1)
    }

    fn writelns(&mut self, lines: &[String]) -> io::Result<()> {
        for line in lines {
            self.writeln(line)?;
        }
        Ok(())
    }

    /// Writes `lines` inside a box, padded to the widest line.
    ///
    /// Embedded newlines split a line into several rows.
    fn write_block(&mut self, lines: &[String]) -> io::Result<()> {
        let rows: Vec<&str> = lines.iter().flat_map(|line| line.split('\n')).collect();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);

        let mut block = Vec::with_capacity(rows.len() + 4);
        block.push(String::new());
        block.push(format!(" ┌{}┐", "─".repeat(width + 2)));
        for row in rows {
            let padding = " ".repeat(width - row.chars().count());
            block.push(format!(" │ {row}{padding} │"));
        }
        block.push(format!(" └{}┘", "─".repeat(width + 2)));
        block.push(String::new());

        self.writelns(&block)
    }

    fn write_error_block(&mut self, lines: &[String]) -> io::Result<()> {
        self.write_block(lines)
    }
}

/// [`Output`] over any [`Write`] implementation.
#[derive(Debug)]
pub struct StreamOutput<W: Write> {
    writer: W,
}

impl<W: Write> StreamOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl StreamOutput<io::Stdout> {
    /// Output to the process's standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Output for StreamOutput<W> {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()
    }
}

/// In-memory [`Output`] whose clones share one buffer.
///
/// Keep a clone before handing the output to an application to read back
/// what commands wrote.
#[derive(Debug, Clone, Default)]
pub struct BufferedOutput {
    buffer: Rc<RefCell<String>>,
}

impl BufferedOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.buffer.borrow().clone()
    }

    pub fn clear(&self) {
        self.buffer.borrow_mut().clear();
    }
}

impl Output for BufferedOutput {
    fn write(&mut self, text: &str) -> io::Result<()> {
        self.buffer.borrow_mut().push_str(text);
        Ok(())
    }
}

/// Line-oriented input source.
pub trait Input {
    /// Reads one raw line, including any line terminator.
    fn read_line(&mut self) -> io::Result<String>;

    /// Reads one line with surrounding whitespace removed.
    fn get(&mut self) -> io::Result<String> {
        Ok(self.read_line()?.trim().to_string())
    }

    /// Reads a yes/no answer.
    ///
    /// `y` and `n` (any case) answer directly. An empty line or `0` gives
    /// `default`, and anything else counts as no.
    fn get_yes_no(&mut self, default: bool) -> io::Result<bool> {
        let answer = self.get()?.to_lowercase();
        Ok(match answer.as_str() {
            "y" => true,
            "n" => false,
            "" | "0" => default,
            _ => false,
        })
    }
}

/// [`Input`] over any [`BufRead`] implementation.
#[derive(Debug)]
pub struct StreamInput<R: BufRead> {
    reader: R,
}

impl<R: BufRead> StreamInput<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl StreamInput<io::StdinLock<'static>> {
    /// Input from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Input for StreamInput<R> {
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        self.reader.read_line(&mut line)?;
        Ok(line)
    }
}
