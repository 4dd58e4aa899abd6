// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/unisteno-core

//! Round-trip integration tests across all media.

use unisteno_core::{
    embed, extract, AudioCarrier, Carrier, DocumentCarrier, DocumentObject,
    EngineError, ImageCarrier, TextCarrier, VideoCarrier,
};

fn opaque_image(width: u32, height: u32) -> ImageCarrier {
    let data: Vec<u8> = (0..(width * height * 3) as usize)
        .map(|i| (i * 31 % 251) as u8)
        .collect();
    ImageCarrier::new(width, height, 3, data).unwrap()
}

#[test]
fn image_roundtrip_basic() {
    let cover = Carrier::Image(opaque_image(64, 64));
    let stego = embed(&cover, "test-passphrase-123", "note.txt", b"Hello, hidden world!")
        .unwrap();
    let recovered = extract(&stego, "test-passphrase-123").unwrap();
    assert_eq!(recovered.filename, "note.txt");
    assert_eq!(recovered.payload, b"Hello, hidden world!");
}

#[test]
fn image_wrong_password_is_integrity_error() {
    let cover = Carrier::Image(opaque_image(64, 64));
    let stego = embed(&cover, "correct-pass", "f.bin", b"secret").unwrap();
    assert_eq!(extract(&stego, "wrong-pass"), Err(EngineError::Integrity));
}

#[test]
fn image_roundtrip_empty_payload() {
    let cover = Carrier::Image(opaque_image(32, 32));
    let stego = embed(&cover, "pass", "empty.bin", b"").unwrap();
    let recovered = extract(&stego, "pass").unwrap();
    assert_eq!(recovered.filename, "empty.bin");
    assert!(recovered.payload.is_empty());
}

#[test]
fn image_roundtrip_unicode_filename() {
    let cover = Carrier::Image(opaque_image(64, 64));
    let stego = embed(&cover, "pass", "notiz-\u{00E4}\u{00F6}.txt", b"data").unwrap();
    let recovered = extract(&stego, "pass").unwrap();
    assert_eq!(recovered.filename, "notiz-\u{00E4}\u{00F6}.txt");
}

#[test]
fn transparent_pixels_survive_embedding_untouched() {
    // Checkerboard alpha: odd pixels fully transparent.
    let width = 32u32;
    let height = 32u32;
    let data: Vec<u8> = (0..(width * height) as usize)
        .flat_map(|i| {
            let alpha = if i % 2 == 1 { 0 } else { 255 };
            [(i % 256) as u8, (i / 7 % 256) as u8, 0xAB, alpha]
        })
        .collect();
    let cover = ImageCarrier::new(width, height, 4, data.clone()).unwrap();

    let stego = embed(&Carrier::Image(cover), "pass", "f", b"payload under alpha").unwrap();
    let out = match stego {
        Carrier::Image(img) => img,
        _ => unreachable!(),
    };
    for (i, chunk) in out.data().chunks_exact(4).enumerate() {
        if i % 2 == 1 {
            assert_eq!(chunk, &data[i * 4..i * 4 + 4], "transparent pixel {i} modified");
        }
    }
    let recovered = extract(&Carrier::Image(out), "pass").unwrap();
    assert_eq!(recovered.payload, b"payload under alpha");
}

#[test]
fn audio_roundtrip_stereo() {
    let samples: Vec<i16> = (0..20_000)
        .map(|i| ((i * 37) % 4001) as i16 - 2000)
        .collect();
    let cover = Carrier::Audio(AudioCarrier::new(44_100, 2, samples).unwrap());
    let stego = embed(&cover, "pass", "voice-memo.bin", b"pcm payload").unwrap();
    let recovered = extract(&stego, "pass").unwrap();
    assert_eq!(recovered.filename, "voice-memo.bin");
    assert_eq!(recovered.payload, b"pcm payload");
}

#[test]
fn video_roundtrip_keeps_trailing_frames_byte_identical() {
    let trailing: Vec<Vec<u8>> = (0..5).map(|i| vec![i as u8; 100 + i]).collect();
    let cover = Carrier::Video(VideoCarrier::new(opaque_image(32, 32), trailing.clone()));

    let stego = embed(&cover, "pass", "clip.bin", b"first frame only").unwrap();
    let video = match &stego {
        Carrier::Video(v) => v,
        _ => unreachable!(),
    };
    assert_eq!(video.trailing_frames(), &trailing[..]);
    assert_eq!(video.frame_count(), 6);

    let recovered = extract(&stego, "pass").unwrap();
    assert_eq!(recovered.payload, b"first frame only");
}

#[test]
fn text_roundtrip_preserves_visible_text() {
    let visible = "Dear reader, nothing to see here.";
    let cover = Carrier::Text(TextCarrier::new(visible.to_string()));
    let stego = embed(&cover, "pass", "hidden.txt", b"between the letters").unwrap();

    let woven = match &stego {
        Carrier::Text(t) => t.text().to_string(),
        _ => unreachable!(),
    };
    let stripped: String = woven
        .chars()
        .filter(|&c| !matches!(c, '\u{200B}' | '\u{200C}' | '\u{200D}'))
        .collect();
    assert_eq!(stripped, visible);

    let recovered = extract(&stego, "pass").unwrap();
    assert_eq!(recovered.filename, "hidden.txt");
    assert_eq!(recovered.payload, b"between the letters");
}

#[test]
fn text_wrong_password_is_integrity_error() {
    let cover = Carrier::Text(TextCarrier::new("cover text".to_string()));
    let stego = embed(&cover, "correct", "f", b"secret").unwrap();
    assert_eq!(extract(&stego, "wrong"), Err(EngineError::Integrity));
}

#[test]
fn clean_text_is_format_error() {
    let cover = Carrier::Text(TextCarrier::new("no hidden stream at all".to_string()));
    assert_eq!(extract(&cover, "pass"), Err(EngineError::Format));
}

#[test]
fn document_roundtrip() {
    let cover = Carrier::Document(DocumentCarrier::new(vec![
        DocumentObject { id: 1, eligible: false, data: b"%PDF-1.7".to_vec() },
        DocumentObject { id: 2, eligible: true, data: vec![0x20; 128] },
        DocumentObject { id: 3, eligible: true, data: b"stream data".to_vec() },
    ]));
    let stego = embed(&cover, "pass", "attachment.bin", b"appended bytes").unwrap();
    let recovered = extract(&stego, "pass").unwrap();
    assert_eq!(recovered.filename, "attachment.bin");
    assert_eq!(recovered.payload, b"appended bytes");
}

#[test]
fn document_without_eligible_objects_cannot_embed() {
    let cover = Carrier::Document(DocumentCarrier::new(vec![DocumentObject {
        id: 1,
        eligible: false,
        data: b"%PDF-1.7".to_vec(),
    }]));
    assert!(matches!(
        embed(&cover, "pass", "f", b"x"),
        Err(EngineError::Capacity { available_bits: 0, .. })
    ));
}

#[test]
fn clean_image_extraction_is_format_error() {
    let cover = Carrier::Image(opaque_image(32, 32));
    assert_eq!(extract(&cover, "pass"), Err(EngineError::Format));
}

#[test]
fn embed_never_modifies_the_input_carrier() {
    let img = opaque_image(32, 32);
    let before = img.data().to_vec();
    let cover = Carrier::Image(img);
    let _ = embed(&cover, "pass", "f", b"payload").unwrap();
    match &cover {
        Carrier::Image(img) => assert_eq!(img.data(), &before[..]),
        _ => unreachable!(),
    }
}
