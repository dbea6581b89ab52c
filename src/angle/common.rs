use super::consts::{
    ARC_MINUTE_SIGN, ARC_SECOND_SIGN, ASCII_DEGREE_SIGN, DEGREE_SIGN, DOUBLE_PRIME_SIGN,
    PRIME_SIGN,
};

/// Construct regular expression to parse Degree-Minute-Second representation of an angle
pub(super) fn parse_dms_re(is_ascii: bool) -> String {
    let (deg, min, sec) = if is_ascii {
        (
            format!("[{DEGREE_SIGN}{ASCII_DEGREE_SIGN}]"),
            ARC_MINUTE_SIGN,
            ARC_SECOND_SIGN,
        )
    } else {
        (DEGREE_SIGN.to_string(), PRIME_SIGN, DOUBLE_PRIME_SIGN)
    };

    format!(
        r"(?x)                                  # enables verbose mode (to allow these comments)
        ^                                           # match the whole line from the start
        (?P<sign>-)?                                    # the sign of the whole angle
        (?P<deg>\d+)                                    # mandatory degree VALUE
        {deg}                                           # degree sign
        (?:\x20*                                        # minutes and seconds group optionally started with spaces
            (?P<min>\d{{1,2}})                              # minutes VALUE (0..=99) - requires more validation!
            {min}                                           # arcminute sign
            (?:\x20*                                        # seconds group optionally started with spaces
                (?P<sec>\d{{1,2}}                               # whole seconds VALUE (0..=99) - requires more validation!
                    (?:\.(?P<sec_fract>\d+))?                       # fractions of arcsecond are optional
                )
                {sec}                                           # arcsecond sign
            )?                                              # seconds are optional
        )?                                              # minutes and seconds are optional
        $                                           # match the whole line till the end
        "
    )
}
