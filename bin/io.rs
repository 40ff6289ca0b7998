use std::fmt::Display;
use std::io::{self, BufRead, BufReader, Lines, Read, Write};
use tracing::instrument;

/// A line-oriented conversation over a pair of byte streams.
#[derive(Debug)]
pub struct Console<W: Write, R: Read> {
    writer: W,
    reader: Lines<BufReader<R>>,
}

impl<W: Write, R: Read> Console<W, R> {
    pub fn new(writer: W, reader: R) -> Self {
        Console {
            writer,
            reader: BufReader::new(reader).lines(),
        }
    }

    /// Receive the next line, or `None` once the input is exhausted.
    #[instrument(level = "trace", skip(self), ret, err)]
    pub fn recv(&mut self) -> io::Result<Option<String>> {
        self.reader.next().transpose()
    }

    /// Send a message, one line per line of its printed form.
    #[instrument(level = "trace", skip(self, msg), err, fields(%msg))]
    pub fn send<T: Display>(&mut self, msg: T) -> io::Result<()> {
        let msg = msg.to_string();
        for line in msg.lines() {
            writeln!(&mut self.writer, "{}", line)?;
        }

        Ok(())
    }

    /// Flush the internal buffers.
    #[instrument(level = "trace", skip(self), err)]
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
