use std::{
    error::Error,
    io::{self, Read},
    num::ParseIntError,
    str::FromStr,
};

use anyhow::{anyhow, Result};
use miette::GraphicalReportHandler;
use nom::{
    character::complete::{char, digit1, space0},
    combinator::{map_res, opt, recognize},
    error::{FromExternalError, ParseError},
    multi::separated_list1,
    sequence::{delimited, tuple},
    IResult,
};
use nom_locate::LocatedSpan;
use nom_supreme::{
    error::{BaseErrorKind, ErrorTree, GenericErrorTree},
    final_parser::final_parser,
};

// Thanks to FasterThanLime! https://fasterthanli.me/series/advent-of-code-2022/part-11

pub type Span<'a> = LocatedSpan<&'a str>;

type BaseKind = BaseErrorKind<&'static str, Box<dyn Error + Send + Sync>>;

#[derive(thiserror::Error, Debug, miette::Diagnostic)]
#[error("bad input")]
struct BadInput<'a> {
    #[source_code]
    src: &'a str,

    #[label("{kind}")]
    bad_bit: miette::SourceSpan,

    kind: BaseKind,
}

/// Signed integer, e.g. `-12` or `7`.
pub fn parse_number<'a, T, E>(i: Span<'a>) -> IResult<Span<'a>, T, E>
where
    T: FromStr<Err = ParseIntError>,
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    map_res(recognize(tuple((opt(char('-')), digit1))), |i: Span<'a>| {
        FromStr::from_str(i.fragment())
    })(i)
}

/// Comma separated numbers, whitespace around the commas allowed.
pub fn parse_number_list<'a, T, E>(i: Span<'a>) -> IResult<Span<'a>, Vec<T>, E>
where
    T: FromStr<Err = ParseIntError>,
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, ParseIntError>,
{
    delimited(
        space0,
        separated_list1(delimited(space0, char(','), space0), parse_number),
        space0,
    )(i)
}

// Stack and Alt trees are reported at their first base error
fn into_base(e: ErrorTree<Span>) -> Option<(Span, BaseKind)> {
    match e {
        GenericErrorTree::Base { location, kind } => Some((location, kind)),
        GenericErrorTree::Stack { base, .. } => into_base(*base),
        GenericErrorTree::Alt(alts) => alts.into_iter().find_map(into_base),
    }
}

fn render_report(l: &str, e: ErrorTree<Span>) -> String {
    let Some((location, kind)) = into_base(e) else {
        return format!("unparseable input: {l}");
    };

    let offset = location.location_offset();
    let err = BadInput {
        src: l,
        bad_bit: miette::SourceSpan::new(offset.into(), 0.into()),
        kind,
    };

    let mut s = String::new();
    match GraphicalReportHandler::new().render_report(&mut s, &err) {
        Ok(()) => s,
        Err(_) => format!("bad input at offset {offset}: {l}"),
    }
}

/// Runs `parse_fun` over the whole of `l`. On failure the miette report is
/// logged and an error is returned.
pub fn parse_nice<'a, T, F>(l: &'a str, parse_fun: F) -> Result<T>
where
    F: FnMut(Span<'a>) -> IResult<Span<'a>, T, ErrorTree<Span<'a>>>,
{
    let line_span = Span::new(l);
    let line: Result<_, ErrorTree<Span>> = final_parser(parse_fun)(line_span);

    line.map_err(|e| {
        let report = render_report(l, e);
        log::error!("{report}");
        anyhow!("couldn't parse {l:?}")
    })
}

pub fn read_input_as_string() -> Result<String> {
    let mut input = String::new();

    io::stdin()
        .lock()
        .read_to_string(&mut input)
        .map_err(anyhow::Error::msg)?;

    Ok(input)
}
