//! Small ASCII pictures keyed by OpenWeather condition id.

const CLEAR: &str = r#"
    \   /
     .-.
  ― (   ) ―
     '-'
    /   \
"#;

const FEW_CLOUDS: &str = r#"
   \  /
 _ /"".-.
   \_(   ).
   /(___(__)
"#;

const SCATTERED_CLOUDS: &str = r#"
     .--.
  .-(    ).
 (___.__)__)
"#;

const BROKEN_CLOUDS: &str = r#"
     .--.
  .-(    ).
 (___.__)__)
     *   *
"#;

const SHOWER_RAIN: &str = r#"
     .-.
    (   ).
   (___(__)
    ' ' ' '
   ' ' ' '
"#;

const RAIN: &str = r#"
     .-.
    (   ).
   (___(__)
  ‚'‚'‚'‚'
 ‚'‚'‚'‚'
"#;

const THUNDERSTORM: &str = r#"
     .-.
    (   ).
   (___(__)
  ⚡''⚡''
 '⚡''⚡'
"#;

const SNOW: &str = r#"
     .-.
    (   ).
   (___(__)
    *  *  *
   *  *  *
"#;

const MIST: &str = r#"
 _ - _ - _ -
  _ - _ - _
 _ - _ - _ -
"#;

const UNKNOWN: &str = r#"
   ?????
  ?     ?
 ?       ?
  ?     ?
   ?????
 No picture for this weather yet.
"#;

pub fn glyph(condition_code: u16) -> &'static str {
    match condition_code {
        800 => CLEAR,
        801 => FEW_CLOUDS,
        802 => SCATTERED_CLOUDS,
        803 => BROKEN_CLOUDS,
        500 => SHOWER_RAIN,
        501 => RAIN,
        200 => THUNDERSTORM,
        600 => SNOW,
        701 => MIST,
        _ => UNKNOWN,
    }
}
