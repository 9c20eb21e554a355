//! Packed files read back through the `ico` crate, an independent ICO reader.

use std::io::Cursor;

use pngico_pack::{pack, ResizedFrame};

fn png_frame(edge: u32, shade: u8) -> ResizedFrame {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, edge, edge);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let pixels: Vec<u8> = (0..edge * edge)
            .flat_map(|i| [shade, (i % 251) as u8, 0x20, 0xFF])
            .collect();
        writer.write_image_data(&pixels).unwrap();
        writer.finish().unwrap();
    }
    ResizedFrame::from_png(buf).unwrap()
}

#[test]
fn standard_reader_recovers_sizes_and_payloads() {
    let edges = [16u32, 32, 48, 64, 128, 256];
    let frames: Vec<ResizedFrame> = edges
        .iter()
        .enumerate()
        .map(|(i, &edge)| png_frame(edge, i as u8 * 40))
        .collect();

    let bytes = pack(&frames).unwrap();
    let expected_len = 6 + 16 * frames.len() + frames.iter().map(|f| f.len()).sum::<usize>();
    assert_eq!(bytes.len(), expected_len);

    let dir = ico::IconDir::read(Cursor::new(&bytes)).unwrap();
    assert_eq!(dir.resource_type(), ico::ResourceType::Icon);
    assert_eq!(dir.entries().len(), edges.len());

    for ((entry, frame), &edge) in dir.entries().iter().zip(&frames).zip(&edges) {
        assert_eq!(entry.width(), edge);
        assert_eq!(entry.height(), edge);
        assert!(entry.is_png());
        assert_eq!(entry.data(), &frame.data()[..]);
    }
}

#[test]
fn standard_reader_decodes_pixels() {
    let frames = vec![png_frame(16, 0x10), png_frame(32, 0x80)];
    let bytes = pack(&frames).unwrap();

    let dir = ico::IconDir::read(Cursor::new(&bytes)).unwrap();
    let image = dir.entries()[1].decode().unwrap();
    assert_eq!(image.width(), 32);
    assert_eq!(image.height(), 32);
    assert_eq!(&image.rgba_data()[..4], &[0x80, 0, 0x20, 0xFF]);
}

#[test]
fn repeated_packing_is_byte_identical() {
    let frames = vec![png_frame(48, 1), png_frame(16, 2)];
    assert_eq!(pack(&frames).unwrap(), pack(&frames).unwrap());
}
