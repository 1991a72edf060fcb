//! This module provides the parser for Turing Machine programs, utilizing the `pest` crate.
//! It defines the grammar for `.tur` files and functions to parse the input into a `Program` struct.

use crate::types::{
    Direction, Program, Transition, TuringMachineError, DEFAULT_ACCEPT_STATE,
    DEFAULT_BLANK_SYMBOL, DEFAULT_REJECT_STATE, MAX_EXECUTION_STEPS,
};
use pest::{
    error::{Error, ErrorVariant},
    iterators::{Pair, Pairs},
    Parser as PestParser, Span,
};
use pest_derive::Parser as PestParser;
use std::collections::HashSet;

/// Derives a `PestParser` for the Turing Machine grammar defined in `grammar.pest`.
#[derive(PestParser)]
#[grammar = "grammar.pest"]
pub struct TuringMachineParser;

/// Parses the given input string into a `Program` struct.
///
/// This is the main entry point for parsing Turing Machine program definitions.
/// It trims the input, parses it using the `TuringMachineParser`, and then processes
/// the resulting parse tree into a structured `Program`. The machine configuration the
/// program describes is validated before it is returned.
///
/// # Arguments
///
/// * `input` - A string slice containing the Turing Machine program definition.
///
/// # Returns
///
/// * `Ok(Program)` if the input is successfully parsed and validated.
/// * `Err(TuringMachineError::ParseError)` if there are any syntax errors.
/// * `Err(TuringMachineError::ValidationError)` if a required section is missing.
/// * `Err(TuringMachineError::InvalidConfig)` if the header describes an unusable machine.
pub fn parse(input: &str) -> Result<Program, TuringMachineError> {
    let root = TuringMachineParser::parse(Rule::program, input.trim())
        .map_err(|e| TuringMachineError::ParseError(e.into()))?
        .next()
        .ok_or_else(|| TuringMachineError::ValidationError("Empty program".to_string()))?;

    let program = parse_program(root)?;

    program.config().validate(program.tape.len())?;

    Ok(program)
}

/// Parses the top-level structure of a Turing Machine program from a `Pair<Rule::program>`.
///
/// Every header section is optional except `name`, `tape` and `rules`. The initial state
/// is taken from `start:` or, failing that, from the first state block.
fn parse_program(pair: Pair<Rule>) -> Result<Program, TuringMachineError> {
    let mut name: Option<String> = None;
    let mut tape: Option<Vec<char>> = None;
    let mut head: Option<usize> = None;
    let mut blank: Option<char> = None;
    let mut start: Option<String> = None;
    let mut accept: Option<String> = None;
    let mut reject: Option<String> = None;
    let mut limit: Option<usize> = None;
    let mut rules: Option<Vec<Transition<String, char>>> = None;
    let mut first_state: Option<String> = None;
    let mut seen = HashSet::new();

    // Parse top-level rules
    for p in pair.into_inner() {
        let span = p.as_span();
        let rule = p.as_rule();

        check_unique_rule(rule, span, &mut seen)?;

        match rule {
            Rule::name => name = Some(parse_inner_string(p)?.trim().to_string()),
            Rule::blank => blank = Some(parse_symbol(&parse_inner_string(p)?)),
            Rule::tape => tape = Some(parse_tape(p)),
            Rule::head => head = Some(parse_index(next_pair(&mut p.into_inner(), span)?)?),
            Rule::start => start = Some(parse_inner_string(p)?),
            Rule::accept => accept = Some(parse_inner_string(p)?),
            Rule::reject => reject = Some(parse_inner_string(p)?),
            Rule::limit => limit = Some(parse_index(next_pair(&mut p.into_inner(), span)?)?),
            Rule::rules => rules = Some(parse_transitions(p, &mut first_state)?),
            _ => {} // Skip EOI
        }
    }

    // Handle mandatory checks
    let name = check_required_rule(name, "name")?;
    let rules = check_required_rule(rules, "rules")?;
    let tape = check_required_rule(tape, "tape")?;
    let initial_state = check_required_rule(start.or(first_state), "start")?;

    Ok(Program {
        name,
        initial_state,
        accept_state: accept.unwrap_or_else(|| DEFAULT_ACCEPT_STATE.to_string()),
        reject_state: reject.unwrap_or_else(|| DEFAULT_REJECT_STATE.to_string()),
        tape,
        head: head.unwrap_or(0),
        blank: blank.unwrap_or(DEFAULT_BLANK_SYMBOL),
        step_limit: limit.unwrap_or(MAX_EXECUTION_STEPS),
        rules,
    })
}

/// Parses the tape definition from a `Pair<Rule::tape>`. An empty `tape:` is a blank tape.
fn parse_tape(pair: Pair<Rule>) -> Vec<char> {
    // Rule: tape > symbols? > [symbol]
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::symbols)
        .flat_map(|symbols| symbols.into_inner())
        .map(|symbol| parse_symbol(symbol.as_str()))
        .collect()
}

/// Creates a `TuringMachineError::ParseError` from a message and a `Span`.
fn parse_error(msg: &str, span: Span) -> TuringMachineError {
    TuringMachineError::ParseError(Box::new(Error::new_from_span(
        ErrorVariant::CustomError {
            message: msg.to_string(),
        },
        span,
    )))
}

/// Parses a non-negative number from a `Pair<Rule::index>`.
fn parse_index(pair: Pair<Rule>) -> Result<usize, TuringMachineError> {
    pair.as_str()
        .parse::<usize>()
        .map_err(|e| parse_error(&format!("Invalid number {}: {e}", pair.as_str()), pair.as_span()))
}

/// Parses the transition rules section from a `Pair<Rule::rules>`.
///
/// State blocks are flattened in file order so that the first matching rule in the file
/// is the one the machine applies. A state may have several blocks. The first state block
/// is recorded as the fallback initial state.
fn parse_transitions(
    pair: Pair<Rule>,
    first_state: &mut Option<String>,
) -> Result<Vec<Transition<String, char>>, TuringMachineError> {
    let mut transitions = Vec::new();

    for block in pair.into_inner() {
        let span = block.as_span();
        let mut pairs = block.into_inner();
        let state = parse_string(&mut pairs, span)?;

        if first_state.is_none() {
            *first_state = Some(state.clone());
        }

        for action in pairs.filter(|p| p.as_rule() == Rule::action) {
            transitions.push(parse_action(action, &state)?);
        }
    }

    Ok(transitions)
}

/// Parses a single action of `state` from a `Pair<Rule::action>`.
///
/// It extracts the read symbol, write symbol (defaults to read if omitted), direction, and next state.
fn parse_action(pair: Pair<Rule>, state: &str) -> Result<Transition<String, char>, TuringMachineError> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();
    let read = parse_symbol_from_pairs(&mut pairs, span)?;

    // If `write` is omitted, we'll make `write` equal to `read`
    let write = match pairs.peek().map(|p| p.as_rule()) {
        Some(Rule::direction) => read,
        _ => parse_symbol_from_pairs(&mut pairs, span)?,
    };

    let direction = parse_direction(next_pair(&mut pairs, span)?)?;
    let next_state = parse_string(&mut pairs, span)?;

    Ok(Transition::new(state.to_string(), read, next_state, write, direction))
}

/// Parses a single direction from a `Pair<Rule::direction>`.
///
/// Supports '<' or 'L' for Left and '>' or 'R' for Right. Stay moves ('-' or 'S') are
/// recognized but rejected, since the head of a single-tape machine always moves.
fn parse_direction(pair: Pair<Rule>) -> Result<Direction, TuringMachineError> {
    let span = pair.as_span();
    match pair.as_str() {
        "<" | "L" => Ok(Direction::Left),
        ">" | "R" => Ok(Direction::Right),
        "-" | "S" => Err(parse_error(
            &format!("Unsupported direction: {} (the head must move L or R)", pair.as_str()),
            span,
        )),
        _ => Err(parse_error(
            &format!("Unsupported direction: {}", pair.as_str()),
            span,
        )),
    }
}

/// Parses a single character symbol from a string, handling quoted and unquoted symbols.
fn parse_symbol(input: &str) -> char {
    input
        .trim_matches('\'')
        .chars()
        .next()
        .unwrap_or(DEFAULT_BLANK_SYMBOL)
}

/// Parses a single character symbol from a `Pairs` iterator.
fn parse_symbol_from_pairs<'i>(
    pairs: &mut Pairs<'i, Rule>,
    span: Span<'i>,
) -> Result<char, TuringMachineError> {
    Ok(parse_symbol(&parse_string(pairs, span)?))
}

/// Extracts the inner string content from a `Pair`.
fn parse_inner_string(pair: Pair<Rule>) -> Result<String, TuringMachineError> {
    let span = pair.as_span();
    parse_string(&mut pair.into_inner(), span)
}

/// Extracts the string content from the current `Pair` in a `Pairs` iterator.
fn parse_string<'i>(pairs: &mut Pairs<'i, Rule>, span: Span<'i>) -> Result<String, TuringMachineError> {
    Ok(next_pair(pairs, span)?.as_str().into())
}

/// Advances `pairs`, reporting a parse error at `span` if the grammar produced fewer pairs
/// than expected.
fn next_pair<'i>(
    pairs: &mut Pairs<'i, Rule>,
    span: Span<'i>,
) -> Result<Pair<'i, Rule>, TuringMachineError> {
    pairs
        .next()
        .ok_or_else(|| parse_error("Unexpected end of declaration", span))
}

/// Checks if a given rule has already been declared, ensuring uniqueness for top-level sections.
fn check_unique_rule(
    rule: Rule,
    span: Span,
    seen: &mut HashSet<Rule>,
) -> Result<(), TuringMachineError> {
    if !matches!(
        rule,
        Rule::name
            | Rule::blank
            | Rule::tape
            | Rule::head
            | Rule::start
            | Rule::accept
            | Rule::reject
            | Rule::limit
            | Rule::rules
    ) {
        return Ok(());
    };

    if !seen.insert(rule) {
        return Err(parse_error(
            &format!("Duplicate \"{rule:?}:\" declaration"),
            span,
        ));
    }

    Ok(())
}

/// Checks if a required rule is present, returning an `Err` if it's missing.
fn check_required_rule<T>(value: Option<T>, name: &str) -> Result<T, TuringMachineError> {
    value.ok_or_else(|| TuringMachineError::ValidationError(format!("Missing '{name}' section")))
}
