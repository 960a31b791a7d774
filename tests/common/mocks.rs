//! Mock version of a byte source such as a socket or a file.
use mockall::mock;

use std::io::{self, Read};

mock! {
    pub Stream {}
    impl Read for Stream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;
    }
}
