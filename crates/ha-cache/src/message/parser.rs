//! Parsers for serialized SIP responses
//!
//! Status-Line grammar (RFC 3261 Section 7.2):
//!
//! ```text
//! Status-Line = SIP-Version SP Status-Code SP Reason-Phrase CRLF
//! Status-Code = 3DIGIT
//! ```
//!
//! Header lines follow as `Name: Value` pairs until an empty line, after
//! which everything remaining is the message body. Line folding and
//! compact header forms are not needed for reconstructing replicated
//! responses, which were serialized by this crate's own `Display` impl or
//! by a well-formed stack.

use nom::{
    bytes::complete::{tag, take_till, take_till1},
    character::complete::{digit1, line_ending, space0, space1},
    combinator::{map, map_res, opt},
    sequence::{terminated, tuple},
    IResult,
};

/// Parse `SIP/<major>.<minor>` into its version numbers
fn sip_version(input: &str) -> IResult<&str, (u8, u8)> {
    let (input, _) = tag("SIP/")(input)?;
    let (input, major) = map_res(digit1, |s: &str| s.parse::<u8>())(input)?;
    let (input, _) = tag(".")(input)?;
    let (input, minor) = map_res(digit1, |s: &str| s.parse::<u8>())(input)?;
    Ok((input, (major, minor)))
}

/// Status-Code = 3DIGIT, valid SIP range 100-699
fn status_code(input: &str) -> IResult<&str, u16> {
    let (rest, digits) = digit1(input)?;
    if digits.len() != 3 {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    let code = digits.parse::<u16>().map_err(|_| {
        nom::Err::Failure(nom::error::Error::new(input, nom::error::ErrorKind::Verify))
    })?;
    if !(100..=699).contains(&code) {
        return Err(nom::Err::Failure(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((rest, code))
}

/// Reason-Phrase: everything up to the line ending, may be empty
fn reason_phrase(input: &str) -> IResult<&str, &str> {
    take_till(|c| c == '\r' || c == '\n')(input)
}

/// Parse the full status line, consuming the trailing line ending
pub fn parse_status_line(input: &str) -> IResult<&str, ((u8, u8), u16, String)> {
    terminated(
        tuple((
            terminated(sip_version, space1),
            terminated(status_code, space1),
            map(reason_phrase, |s: &str| s.to_string()),
        )),
        line_ending,
    )(input)
}

/// Parse one `Name: Value` header line, consuming the trailing line ending
///
/// Returns `None` on the empty line that separates headers from the body.
pub fn parse_header_line(input: &str) -> IResult<&str, Option<(String, String)>> {
    // Empty line ends the header section
    if let Ok((rest, _)) = line_ending::<&str, nom::error::Error<&str>>(input) {
        return Ok((rest, None));
    }
    let (input, name) = take_till1(|c| c == ':' || c == '\r' || c == '\n')(input)?;
    let (input, _) = tag(":")(input)?;
    let (input, _) = space0(input)?;
    let (input, value) = take_till(|c| c == '\r' || c == '\n')(input)?;
    let (input, _) = opt(line_ending)(input)?;
    Ok((
        input,
        Some((name.trim_end().to_string(), value.trim_end().to_string())),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sip_version() {
        assert_eq!(sip_version("SIP/2.0 rest"), Ok((" rest", (2, 0))));
        assert!(sip_version("SIPP/2.0").is_err());
        assert!(sip_version("2.0").is_err());
    }

    #[test]
    fn test_status_code() {
        assert_eq!(status_code("200 OK"), Ok((" OK", 200)));
        assert_eq!(status_code("404 Not Found"), Ok((" Not Found", 404)));
        assert!(status_code("20 ").is_err());
        assert!(status_code("2000").is_err());
        assert!(status_code("999").is_err());
        assert!(status_code("ABC").is_err());
    }

    #[test]
    fn test_parse_status_line() {
        let (rest, (version, status, reason)) =
            parse_status_line("SIP/2.0 200 OK\r\nVia: x\r\n").unwrap();
        assert_eq!(rest, "Via: x\r\n");
        assert_eq!(version, (2, 0));
        assert_eq!(status, 200);
        assert_eq!(reason, "OK");
    }

    #[test]
    fn test_parse_status_line_empty_reason_rejected() {
        // Reason phrase may be empty but the separating SP must be present
        assert!(parse_status_line("SIP/2.0 200\r\n").is_err());
    }

    #[test]
    fn test_parse_header_line() {
        let (rest, header) = parse_header_line("Call-ID: abc@host\r\nNext: y\r\n").unwrap();
        assert_eq!(rest, "Next: y\r\n");
        assert_eq!(header, Some(("Call-ID".to_string(), "abc@host".to_string())));
    }

    #[test]
    fn test_parse_header_line_blank_terminates() {
        let (rest, header) = parse_header_line("\r\nbody").unwrap();
        assert_eq!(rest, "body");
        assert_eq!(header, None);
    }
}
