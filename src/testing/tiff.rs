// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Builds minimal little-endian TIFF files carrying EXIF date tags, which is
//! enough for any TIFF-based RAW reader.

const TAG_DATE_TIME: u16 = 0x0132;
const TAG_EXIF_IFD: u16 = 0x8769;
const TAG_DATE_TIME_ORIGINAL: u16 = 0x9003;

const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;

const HEADER_LEN: usize = 8;
const ENTRY_LEN: usize = 12;

/// `original` goes into the Exif IFD as `DateTimeOriginal`, `modified` into
/// IFD0 as `DateTime`. Both must be 19 characters (`YYYY:MM:DD HH:MM:SS`).
pub fn make_tiff(original: Option<&str>, modified: Option<&str>) -> Vec<u8> {
  let ifd0_entries = usize::from(modified.is_some()) + usize::from(original.is_some());
  let ifd0_len = ifd_len(ifd0_entries);
  let exif_ifd_offset = HEADER_LEN + ifd0_len;
  let exif_ifd_len = if original.is_some() { ifd_len(1) } else { 0 };
  let data_offset = exif_ifd_offset + exif_ifd_len;

  let modified_offset = data_offset;
  let original_offset = data_offset + modified.map_or(0, |m| m.len() + 1);

  let mut out = Vec::new();
  out.extend(b"II*\0");
  push_u32(&mut out, HEADER_LEN);

  // IFD0, entries sorted by tag.
  push_u16(&mut out, ifd0_entries);
  if let Some(m) = modified {
    push_entry(&mut out, TAG_DATE_TIME, TYPE_ASCII, m.len() + 1, modified_offset);
  }
  if original.is_some() {
    push_entry(&mut out, TAG_EXIF_IFD, TYPE_LONG, 1, exif_ifd_offset);
  }
  push_u32(&mut out, 0);

  if let Some(o) = original {
    push_u16(&mut out, 1);
    push_entry(&mut out, TAG_DATE_TIME_ORIGINAL, TYPE_ASCII, o.len() + 1, original_offset);
    push_u32(&mut out, 0);
  }

  assert_eq!(out.len(), data_offset);

  for value in [modified, original].into_iter().flatten() {
    out.extend(value.as_bytes());
    out.push(0);
  }

  out
}

fn ifd_len(entries: usize) -> usize {
  2 + ENTRY_LEN * entries + 4
}

fn push_entry(out: &mut Vec<u8>, tag: u16, kind: u16, count: usize, value: usize) {
  out.extend(tag.to_le_bytes());
  out.extend(kind.to_le_bytes());
  push_u32(out, count);
  push_u32(out, value);
}

fn push_u16(out: &mut Vec<u8>, value: usize) {
  out.extend(u16::try_from(value).unwrap().to_le_bytes());
}

fn push_u32(out: &mut Vec<u8>, value: usize) {
  out.extend(u32::try_from(value).unwrap().to_le_bytes());
}
