// Copyright 2023-5 Seth Pendergrass. See LICENSE.

//! Extra asserts to make tests shorter / more readable.

#[macro_export]
macro_rules! assert_src {
  ($dir:expr, [$($path:literal),* $(,)?]) => {{
    let actual = $dir.files_src();
    let expected = std::collections::HashSet::from([$($dir.get_src($path)),*]);

    assert!(
      actual == expected,
      "Source contents do not match:\nActual:   {actual:#?}\nExpected: {expected:#?}"
    );
  }}
}

#[macro_export]
macro_rules! assert_dst {
  ($dir:expr, [$($path:literal),* $(,)?]) => {{
    let actual = $dir.files_dst();
    let expected = std::collections::HashSet::from([$($dir.get_dst($path)),*]);

    assert!(
      actual == expected,
      "Destination contents do not match:\nActual:   {actual:#?}\nExpected: {expected:#?}"
    );
  }}
}

#[macro_export]
macro_rules! assert_err {
  ($res:expr, $msg:literal) => {{
    let Err(e) = $res else {
      panic!("Unexpected `Ok`.");
    };
    let e = e.to_string();

    assert!(
      e.contains($msg),
      "Error message did not contain expected substring.\nActual:\n{e}\nExpected:\n{}",
      $msg
    );
  }};
}
