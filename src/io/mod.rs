//! Destinations for solver progress output.
//!
//! Every solver owns a [`PrintTarget`] and exposes it through the
//! [`ConfigurablePrintTarget`] trait, so that verbose output can be
//! sent to stdout, a file, an in-memory buffer, an arbitrary stream,
//! or discarded altogether.

use std::fs::File;
use std::io::{self, Error, ErrorKind, Stdout, Write};

/// Container for the active print destination
#[derive(Default)]
pub(crate) enum PrintTarget {
    #[default]
    Stdout,
    File(File),
    Buffer(Vec<u8>),
    Stream(Box<dyn Write + Send + Sync>),
    Sink,
}

impl PrintTarget {
    fn stdout() -> Stdout {
        io::stdout()
    }
}

impl std::fmt::Debug for PrintTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PrintTarget::Stdout => "Stdout",
            PrintTarget::File(_) => "File",
            PrintTarget::Buffer(_) => "Buffer",
            PrintTarget::Stream(_) => "Stream",
            PrintTarget::Sink => "Sink",
        };
        write!(f, "PrintTarget::{name}")
    }
}

impl Write for PrintTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            PrintTarget::Stdout => Self::stdout().write(buf),
            PrintTarget::File(file) => file.write(buf),
            PrintTarget::Buffer(buffer) => {
                buffer.extend_from_slice(buf);
                Ok(buf.len())
            }
            PrintTarget::Stream(stream) => stream.write(buf),
            PrintTarget::Sink => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            PrintTarget::Stdout => Self::stdout().flush(),
            PrintTarget::File(file) => file.flush(),
            PrintTarget::Stream(stream) => stream.flush(),
            PrintTarget::Buffer(_) | PrintTarget::Sink => Ok(()),
        }
    }
}

/// Trait implemented by solvers that allow configurable print targets
pub trait ConfigurablePrintTarget {
    /// redirect print output to stdout (the default)
    fn print_to_stdout(&mut self);
    /// redirect print output to a file
    fn print_to_file(&mut self, file: File);
    /// redirect print output to a stream
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>);
    /// discard all print output
    fn print_to_sink(&mut self);
    /// redirect print output to an internal buffer
    fn print_to_buffer(&mut self);
    /// get the contents of the internal print buffer
    fn get_print_buffer(&mut self) -> io::Result<String>;
}

impl ConfigurablePrintTarget for PrintTarget {
    fn print_to_stdout(&mut self) {
        *self = PrintTarget::Stdout;
    }
    fn print_to_file(&mut self, file: File) {
        *self = PrintTarget::File(file);
    }
    fn print_to_stream(&mut self, stream: Box<dyn Write + Send + Sync>) {
        *self = PrintTarget::Stream(stream);
    }
    fn print_to_sink(&mut self) {
        *self = PrintTarget::Sink;
    }
    fn print_to_buffer(&mut self) {
        *self = PrintTarget::Buffer(Vec::new());
    }
    fn get_print_buffer(&mut self) -> io::Result<String> {
        match self {
            PrintTarget::Buffer(buffer) => Ok(String::from_utf8_lossy(buffer).to_string()),
            _ => Err(Error::new(
                ErrorKind::Other,
                "print buffering is not configured",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_target() {
        let mut target = PrintTarget::default();
        assert!(target.get_print_buffer().is_err());

        target.print_to_buffer();
        write!(target, "λ = {}", 1.5).unwrap();
        writeln!(target, " ok").unwrap();
        assert_eq!(target.get_print_buffer().unwrap(), "λ = 1.5 ok\n");

        // switching away drops the buffer contents
        target.print_to_sink();
        writeln!(target, "discarded").unwrap();
        assert!(target.get_print_buffer().is_err());
        assert_eq!(format!("{target:?}"), "PrintTarget::Sink");
    }
}
