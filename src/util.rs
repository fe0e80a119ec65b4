pub use {clap::Parser, graph::*};

use {
    memmap::Mmap,
    nom::IResult,
    std::{
        fs::File,
        io::{Error as IoError, ErrorKind, Result as IoResult},
        str::{from_utf8, Utf8Error},
    },
};

mod graph;

/// Arguments for program execution
#[derive(Debug, Parser)]
pub struct Args {
    /// Input file path. Standard input is read instead when this is empty.
    #[arg(short, long, default_value_t)]
    input_file_path: String,
}

impl Args {
    pub fn input_file_path(&self) -> Option<&str> {
        (!self.input_file_path.is_empty()).then_some(self.input_file_path.as_str())
    }
}

pub const UPPERCASE_A_OFFSET: u8 = b'A';

/// Opens a memory-mapped UTF-8 file at a specified path, and passes a `&str` over the file to a
/// provided callback function
///
/// # Errors
///
/// This function returns a `Result::Err`-wrapped `std::io::Error` if `std::fs::File::open` or
/// `memmap::Mmap::map` fails, or if the file contents are not valid UTF-8. `f` is only executed
/// *iff* an error is not encountered.
///
/// # Safety
///
/// This function uses `Mmap::map`, which is an unsafe function. There is no guarantee that an
/// external process won't modify the file after it is opened as read-only, and it is UB if that
/// happens while this function refers to it as an immutable string slice. For more info on this,
/// see:
///
/// * https://www.reddit.com/r/rust/comments/wyq3ih/why_are_memorymapped_files_unsafe/
/// * https://users.rust-lang.org/t/how-unsafe-is-mmap/19635
pub unsafe fn open_utf8_file<T, F: FnOnce(&str) -> T>(file_path: &str, f: F) -> IoResult<T> {
    let file: File = File::open(file_path)?;

    // SAFETY: This operation is unsafe
    let mmap: Mmap = Mmap::map(&file)?;
    let bytes: &[u8] = &mmap;
    let utf8_str: &str = from_utf8(bytes).map_err(|utf8_error: Utf8Error| -> IoError {
        IoError::new(ErrorKind::InvalidData, utf8_error)
    })?;

    Ok(f(utf8_str))
}

pub trait Parse: Sized {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self>;
}
