// Copyright 2023-5 Seth Pendergrass. See LICENSE.

use std::{
  fs::{self, File},
  path::Path,
  time::SystemTime,
};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};

pub fn make_date_naive(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(year, month, day)
    .and_then(|d| d.and_hms_opt(hour, min, sec))
    .unwrap_or_else(|| panic!("Invalid naive date & time: {year}-{month}-{day}T{hour}:{min}:{sec}"))
}

/// Sets the filesystem modification time of `path`, interpreting `when` in
/// the local time zone.
pub fn set_mtime(path: impl AsRef<Path>, when: NaiveDateTime) {
  let local = Local.from_local_datetime(&when).unwrap();
  File::options()
    .write(true)
    .open(path)
    .unwrap()
    .set_modified(SystemTime::from(local))
    .unwrap();
}

pub fn get_mtime(path: impl AsRef<Path>) -> NaiveDateTime {
  let modified = fs::metadata(path).unwrap().modified().unwrap();
  DateTime::<Local>::from(modified).naive_local()
}
