use nom::IResult;
use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_until};
use nom::character::complete::{anychar, digit1};
use nom::combinator::{all_consuming, map, map_res, rest, verify};
use nom::multi::many0;
use nom::sequence::delimited;

use crate::engine::{Template, TemplatePart};

pub fn parse_template(input: &str) -> IResult<&str, Template> {
    all_consuming(map(many0(parse_element), |parts| Template { parts })).parse(input)
}

pub fn parse_element(input: &str) -> IResult<&str, TemplatePart> {
    alt((
        map(parse_placeholder, TemplatePart::Placeholder),
        map(parse_literal_text, |text| {
            TemplatePart::Literal(text.to_string())
        }),
        // A token prefix not followed by a well-formed token is literal text;
        // consume one character so the scan can move past it.
        map(anychar, |c| TemplatePart::Literal(c.to_string())),
    ))
    .parse(input)
}

pub fn parse_placeholder(input: &str) -> IResult<&str, u32> {
    delimited(tag("{輸入文字("), placeholder_index, tag(")}")).parse(input)
}

pub fn parse_literal_text(input: &str) -> IResult<&str, &str> {
    verify(alt((take_until("{輸入文字("), rest)), |s: &&str| {
        !s.is_empty()
    })
    .parse(input)
}

fn placeholder_index(input: &str) -> IResult<&str, u32> {
    map_res(digit1, |digits: &str| digits.parse::<u32>()).parse(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let result = parse_template("");
        assert!(result.is_ok());
        let (remaining, template) = result.unwrap();
        assert_eq!(remaining, "");
        assert!(template.parts.is_empty());
    }

    #[test]
    fn test_parse_literal_text() {
        let result = parse_literal_text("Hello!");
        assert_eq!(result, Ok(("", "Hello!")));
    }

    #[test]
    fn test_parse_placeholder() {
        let result = parse_placeholder("{輸入文字(2)} more text");
        assert_eq!(result, Ok((" more text", 2)));
    }

    #[test]
    fn test_parse_placeholder_multi_digit_index() {
        let result = parse_placeholder("{輸入文字(12)}");
        assert_eq!(result, Ok(("", 12)));
    }

    #[test]
    fn test_parse_consecutive_placeholders() {
        let result = parse_template("{輸入文字(1)}{輸入文字(2)}{輸入文字(3)}");
        assert!(result.is_ok());
        let (remaining, template) = result.unwrap();
        assert_eq!(remaining, "");
        assert_eq!(template.parts.len(), 3);
    }

    #[test]
    fn test_parse_placeholders_at_boundaries() {
        let result = parse_template("{輸入文字(1)}middle{輸入文字(2)}");
        assert!(result.is_ok());
        let (remaining, template) = result.unwrap();
        assert_eq!(remaining, "");
        assert_eq!(
            template.parts,
            vec![
                TemplatePart::Placeholder(1),
                TemplatePart::Literal("middle".to_string()),
                TemplatePart::Placeholder(2),
            ]
        );
    }

    #[test]
    fn test_parse_unclosed_token_is_literal() {
        let result = parse_template("Hello {輸入文字(1");
        assert!(result.is_ok());
        let (remaining, template) = result.unwrap();
        assert_eq!(remaining, "");
        assert!(
            template
                .parts
                .iter()
                .all(|part| matches!(part, TemplatePart::Literal(_)))
        );
    }

    #[test]
    fn test_parse_non_numeric_index_is_literal() {
        let result = parse_template("{輸入文字(abc)}");
        assert!(result.is_ok());
        let (_, template) = result.unwrap();
        assert!(
            template
                .parts
                .iter()
                .all(|part| matches!(part, TemplatePart::Literal(_)))
        );
    }

    #[test]
    fn test_parse_stray_prefix_before_real_token() {
        let result = parse_template("{輸入文字(x} {輸入文字(1)}");
        assert!(result.is_ok());
        let (remaining, template) = result.unwrap();
        assert_eq!(remaining, "");
        assert!(
            template
                .parts
                .contains(&TemplatePart::Placeholder(1))
        );
    }

    #[test]
    fn test_parse_plain_braces_are_literal() {
        let result = parse_template("Hello {name} with ordinary braces");
        assert!(result.is_ok());
        let (_, template) = result.unwrap();
        assert_eq!(template.parts.len(), 1);
        assert!(matches!(template.parts[0], TemplatePart::Literal(_)));
    }

    #[test]
    fn test_parse_element_placeholder() {
        let result = parse_element("{輸入文字(7)}");
        assert_eq!(result, Ok(("", TemplatePart::Placeholder(7))));
    }

    #[test]
    fn test_parse_element_literal() {
        let result = parse_element("some text");
        assert_eq!(
            result,
            Ok(("", TemplatePart::Literal("some text".to_string())))
        );
    }

    #[test]
    fn test_parse_template() {
        let result = parse_template("Hello {輸入文字(1)}, bye {輸入文字(2)}!");
        assert!(result.is_ok());
        let (remaining, template) = result.unwrap();
        assert_eq!(remaining, "");
        assert_eq!(template.parts.len(), 5);
    }

    #[test]
    fn test_parse_leading_zeros_index() {
        let result = parse_placeholder("{輸入文字(007)}");
        assert_eq!(result, Ok(("", 7)));
    }
}
