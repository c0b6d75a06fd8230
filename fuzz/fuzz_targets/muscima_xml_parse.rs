//! Fuzz target for MUSCIMA++ XML parsing.
//!
//! Feeds arbitrary bytes to the XML reader and encodes every staff that
//! parses, checking for panics, crashes, or hangs.

#![no_main]

use libfuzzer_sys::fuzz_target;
use staffseq::ir::io_muscima_xml::fuzz_encode_muscima_xml;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid excessive memory usage.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let _ = fuzz_encode_muscima_xml(data);
});
