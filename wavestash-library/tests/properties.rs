use std::io::Cursor;

use proptest::prelude::*;
use wavestash_library::{Library, Query};

/// Mono 8-bit file at 8 kHz, so every 8000 bytes of declared RIFF size is one second.
fn wave_lasting(eighths: u32) -> Vec<u8> {
    let mut bytes = vec![];
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(eighths * 1000).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&8u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes
}

proptest! {
    #[test]
    fn listing_keeps_exactly_the_files_strictly_inside_the_bounds(
        lengths in prop::collection::vec(0u32..80, 0..12),
        min in 0u32..10,
        max in 0u32..10,
    ) {
        let mut library = Library::new();
        for (i, &eighths) in lengths.iter().enumerate() {
            library.ingest(&format!("{i:02}.wav"), Cursor::new(wave_lasting(eighths))).unwrap();
        }

        let (min, max) = (f64::from(min), f64::from(max));
        let query = Query::from_args([
            ("minduration", min.to_string().as_str()),
            ("maxduration", max.to_string().as_str()),
        ])
        .unwrap();
        let listed: Vec<String> = library.list(&query).into_iter().map(|info| info.name).collect();

        let expected: Vec<String> = lengths
            .iter()
            .enumerate()
            .filter(|&(_, &eighths)| {
                let seconds = f64::from(eighths) / 8.0;
                seconds > min && seconds < max
            })
            .map(|(i, _)| format!("{i:02}.wav"))
            .collect();
        prop_assert_eq!(listed, expected);
    }

    #[test]
    fn downloads_return_the_uploaded_bytes(
        eighths in 0u32..1000,
        trailer in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut bytes = wave_lasting(eighths);
        // An unknown chunk after the data chunk is stored along with everything else.
        bytes.extend_from_slice(b"JUNK");
        bytes.extend_from_slice(&(trailer.len() as u32).to_le_bytes());
        bytes.extend_from_slice(&trailer);

        let mut library = Library::new();
        library.ingest("a.wav", Cursor::new(&bytes)).unwrap();
        prop_assert_eq!(library.download("a.wav").unwrap(), bytes);
    }
}
