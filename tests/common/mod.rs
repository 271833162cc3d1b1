//! Mock versions of the std::io traits the adapters sit on.
use mockall::mock;

use std::io::{self, Read, Write};

mock! {
    pub Output {}
    impl Write for Output {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize>;
        fn flush(&mut self) -> io::Result<()>;
    }
}

mock! {
    pub Input {}
    impl Read for Input {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    }
}
