//! TPTP problem parser
//!
//! Supports the TPTP subset relevant here: `cnf(name, role, clause).`,
//! `fof(name, role, formula).` with the usual connectives and
//! quantifiers, `include('file').`, `%` comments, infix `=` and `!=`,
//! `$true`/`$false`, and single-quoted atoms. Variables start with an
//! uppercase letter or underscore.
//!
//! Parsing happens in three stages: the input is split into
//! `.`-terminated statements (tracking line numbers for error
//! reporting), each statement is parsed with nom into a raw string-based
//! AST, and the raw AST is lowered onto the interned data model with
//! arity checking.

use super::cnf_conversion::CnfConverter;
use super::fof::{FofFormula, FormulaRole, NamedFormula, Quantifier};
use crate::fol::{
    Atom, Clause, ClauseRole, CnfFormula, Constant, FunctionSymbol, Interner, Literal,
    PredicateSymbol, Term, Variable,
};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, multispace0},
    combinator::{opt, value},
    multi::separated_list1,
    sequence::delimited,
    IResult,
};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fatal problems with the input, reported once at the boundary.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("line {line}: syntax error in '{statement}'")]
    Syntax { line: usize, statement: String },
    #[error("line {line}: unsupported construct: {detail}")]
    Unsupported { line: usize, detail: String },
    #[error("symbol '{symbol}' used with arities {first} and {second}")]
    ArityMismatch {
        symbol: String,
        first: usize,
        second: usize,
    },
    #[error("unknown formula role '{role}'")]
    UnknownRole { role: String },
    #[error("include file '{0}' not found")]
    IncludeNotFound(String),
    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result of parsing (and clausifying) a TPTP problem
#[derive(Debug)]
pub struct ParsedProblem {
    pub formula: CnfFormula,
    pub interner: Interner,
    /// The input contained at least one `fof` formula.
    pub is_fof: bool,
    /// The input contained a `fof` conjecture.
    pub has_conjecture: bool,
}

/// Parse a TPTP problem from a string.
pub fn parse_problem(input: &str, include_dirs: &[&str]) -> Result<ParsedProblem, ParseError> {
    let mut statements = Vec::new();
    let mut visited = HashSet::new();
    collect_from_content(input, Path::new("."), include_dirs, &mut visited, &mut statements)?;
    lower_problem(statements)
}

/// Parse a TPTP problem from a file, resolving includes relative to the
/// file's directory and the given include directories.
pub fn parse_problem_file(
    path: &str,
    include_dirs: &[&str],
) -> Result<ParsedProblem, ParseError> {
    let mut statements = Vec::new();
    let mut visited = HashSet::new();
    collect_from_file(Path::new(path), include_dirs, &mut visited, &mut statements)?;
    lower_problem(statements)
}

// =========================================================================
// Raw, string-based AST
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
enum RawTerm {
    Var(String),
    /// Function application; zero arguments means a constant.
    App(String, Vec<RawTerm>),
}

/// Predicate name and arguments; equality uses the name `=`.
#[derive(Debug, Clone, PartialEq)]
struct RawAtom {
    predicate: String,
    args: Vec<RawTerm>,
}

#[derive(Debug, Clone, PartialEq)]
struct RawLiteral {
    polarity: bool,
    atom: RawAtom,
}

#[derive(Debug, Clone, PartialEq)]
enum RawFormula {
    Atom(RawAtom),
    Not(Box<RawFormula>),
    And(Box<RawFormula>, Box<RawFormula>),
    Or(Box<RawFormula>, Box<RawFormula>),
    Implies(Box<RawFormula>, Box<RawFormula>),
    Iff(Box<RawFormula>, Box<RawFormula>),
    Xor(Box<RawFormula>, Box<RawFormula>),
    Nand(Box<RawFormula>, Box<RawFormula>),
    Nor(Box<RawFormula>, Box<RawFormula>),
    Quantified(Quantifier, Vec<String>, Box<RawFormula>),
}

#[derive(Debug)]
enum Statement {
    Cnf {
        role: String,
        literals: Vec<RawLiteral>,
    },
    Fof {
        role: String,
        formula: RawFormula,
    },
    Include(String),
}

// =========================================================================
// Statement collection
// =========================================================================

/// Split the input into `.`-terminated statements, skipping `%` comment
/// lines, and parse each one; includes are resolved recursively.
fn collect_from_content(
    input: &str,
    current_dir: &Path,
    include_dirs: &[&str],
    visited: &mut HashSet<PathBuf>,
    out: &mut Vec<(usize, Statement)>,
) -> Result<(), ParseError> {
    let mut statement = String::new();
    let mut statement_line = 0;

    for (lineno, line) in input.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') {
            continue;
        }
        if statement.is_empty() {
            statement_line = lineno + 1;
        } else {
            statement.push(' ');
        }
        statement.push_str(line);

        if statement.ends_with('.') {
            let parsed = parse_statement(&statement).ok_or_else(|| ParseError::Syntax {
                line: statement_line,
                statement: statement.clone(),
            })?;
            match parsed {
                Statement::Include(file) => {
                    let path = find_include_file(&file, current_dir, include_dirs)?;
                    collect_from_file(&path, include_dirs, visited, out)?;
                }
                other => out.push((statement_line, other)),
            }
            statement.clear();
        }
    }

    if !statement.is_empty() {
        return Err(ParseError::Syntax {
            line: statement_line,
            statement,
        });
    }
    Ok(())
}

fn collect_from_file(
    path: &Path,
    include_dirs: &[&str],
    visited: &mut HashSet<PathBuf>,
    out: &mut Vec<(usize, Statement)>,
) -> Result<(), ParseError> {
    if !visited.insert(path.to_path_buf()) {
        return Ok(());
    }
    let content = fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let parent = path.parent().unwrap_or(Path::new("."));
    collect_from_content(&content, parent, include_dirs, visited, out)
}

fn find_include_file(
    filename: &str,
    current_dir: &Path,
    include_dirs: &[&str],
) -> Result<PathBuf, ParseError> {
    let local = current_dir.join(filename);
    if local.exists() {
        return Ok(local);
    }
    for dir in include_dirs {
        let path = Path::new(dir).join(filename);
        if path.exists() {
            return Ok(path);
        }
    }
    Err(ParseError::IncludeNotFound(filename.to_string()))
}

// =========================================================================
// nom parsers over one statement
// =========================================================================

/// Parse one complete statement; returns None if anything is left over.
fn parse_statement(input: &str) -> Option<Statement> {
    let (rest, statement) = alt((parse_include, parse_cnf, parse_fof))(input).ok()?;
    rest.trim().is_empty().then_some(statement)
}

fn parse_include(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag("include")(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, file) = single_quoted(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(')')(input)?;
    let (input, _) = char('.')(input)?;
    Ok((input, Statement::Include(file)))
}

fn parse_cnf(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag("cnf")(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _name) = formula_name(input)?;
    let (input, _) = statement_comma(input)?;
    let (input, role) = lower_word(input)?;
    let (input, _) = statement_comma(input)?;
    let (input, literals) = cnf_clause(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = annotations(input)?;
    let (input, _) = char(')')(input)?;
    let (input, _) = char('.')(input)?;
    Ok((
        input,
        Statement::Cnf {
            role: role.to_string(),
            literals,
        },
    ))
}

fn parse_fof(input: &str) -> IResult<&str, Statement> {
    let (input, _) = tag("fof")(input)?;
    let (input, _) = char('(')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _name) = formula_name(input)?;
    let (input, _) = statement_comma(input)?;
    let (input, role) = lower_word(input)?;
    let (input, _) = statement_comma(input)?;
    let (input, formula) = fof_formula(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = annotations(input)?;
    let (input, _) = char(')')(input)?;
    let (input, _) = char('.')(input)?;
    Ok((
        input,
        Statement::Fof {
            role: role.to_string(),
            formula,
        },
    ))
}

fn statement_comma(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char(',')(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, ()))
}

/// Optional source/useful-info annotations: a comma followed by
/// anything up to the closing parenthesis of the statement, tracking
/// nesting depth.
fn annotations(input: &str) -> IResult<&str, ()> {
    let Some(rest) = input.strip_prefix(',') else {
        return Ok((input, ()));
    };
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '(' | '[' => depth += 1,
            ')' | ']' if depth == 0 => return Ok((&rest[i..], ())),
            ')' | ']' => depth -= 1,
            _ => {}
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::TakeUntil,
    )))
}

// --- Names and words ---

fn lower_word(input: &str) -> IResult<&str, &str> {
    word_starting_with(input, |c| c.is_ascii_lowercase())
}

fn upper_word(input: &str) -> IResult<&str, &str> {
    word_starting_with(input, |c| c.is_ascii_uppercase() || c == '_')
}

fn integer_word(input: &str) -> IResult<&str, &str> {
    word_starting_with(input, |c| c.is_ascii_digit())
}

fn dollar_word(input: &str) -> IResult<&str, &str> {
    if !input.starts_with('$') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    }
    let (_, word) = lower_word(&input[1..])?;
    let len = 1 + word.len();
    Ok((&input[len..], &input[..len]))
}

fn word_starting_with(input: &str, first: impl Fn(char) -> bool) -> IResult<&str, &str> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, c)) if first(c) => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Alpha,
            )))
        }
    }
    let end = input
        .char_indices()
        .skip(1)
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    Ok((&input[end..], &input[..end]))
}

/// Single-quoted atom; backslash escapes the next character. Returns
/// the unquoted content.
fn single_quoted(input: &str) -> IResult<&str, String> {
    let Some(rest) = input.strip_prefix('\'') else {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Char,
        )));
    };
    let mut content = String::new();
    let mut chars = rest.char_indices();
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    content.push(escaped);
                }
            }
            '\'' => return Ok((&rest[i + c.len_utf8()..], content)),
            other => content.push(other),
        }
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn formula_name(input: &str) -> IResult<&str, String> {
    alt((
        |i| single_quoted(i),
        |i| lower_word(i).map(|(rest, w)| (rest, w.to_string())),
        |i| integer_word(i).map(|(rest, w)| (rest, w.to_string())),
    ))(input)
}

// --- Terms ---

fn term(input: &str) -> IResult<&str, RawTerm> {
    if let Ok((rest, var)) = upper_word(input) {
        return Ok((rest, RawTerm::Var(var.to_string())));
    }
    let (input, functor) = functor_name(input)?;
    let (input, args) = opt(term_args)(input)?;
    Ok((input, RawTerm::App(functor, args.unwrap_or_default())))
}

fn functor_name(input: &str) -> IResult<&str, String> {
    alt((
        |i| single_quoted(i),
        |i| lower_word(i).map(|(rest, w)| (rest, w.to_string())),
        |i| dollar_word(i).map(|(rest, w)| (rest, w.to_string())),
        |i| integer_word(i).map(|(rest, w)| (rest, w.to_string())),
    ))(input)
}

fn term_args(input: &str) -> IResult<&str, Vec<RawTerm>> {
    delimited(
        char('('),
        separated_list1(statement_comma_like, spaced_term),
        char(')'),
    )(input)
}

fn statement_comma_like(input: &str) -> IResult<&str, ()> {
    let (input, _) = multispace0(input)?;
    let (input, _) = char(',')(input)?;
    Ok((input, ()))
}

fn spaced_term(input: &str) -> IResult<&str, RawTerm> {
    let (input, _) = multispace0(input)?;
    let (input, t) = term(input)?;
    let (input, _) = multispace0(input)?;
    Ok((input, t))
}

/// A term followed by an optional infix `=` or `!=`. Yields an atom and
/// the polarity contributed by the operator.
fn atom_maybe_infix(input: &str) -> IResult<&str, (RawAtom, bool)> {
    let (input, left) = term(input)?;
    let (input, _) = multispace0(input)?;

    if let Ok((rest, op)) = alt((
        value("!=", tag::<_, _, nom::error::Error<&str>>("!=")),
        value("=", tag("=")),
    ))(input)
    {
        // Guard against `=>` and `<=`-style operators in FOF context
        if !rest.starts_with('>') {
            let (rest, _) = multispace0(rest)?;
            let (rest, right) = term(rest)?;
            let atom = RawAtom {
                predicate: "=".to_string(),
                args: vec![left, right],
            };
            return Ok((rest, (atom, op == "=")));
        }
    }

    match left {
        RawTerm::App(predicate, args) => Ok((input, (RawAtom { predicate, args }, true))),
        RawTerm::Var(_) => Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Tag,
        ))),
    }
}

// --- CNF clauses ---

fn cnf_clause(input: &str) -> IResult<&str, Vec<RawLiteral>> {
    alt((
        delimited(
            char('('),
            |i| {
                let (i, _) = multispace0(i)?;
                cnf_disjunction(i)
            },
            char(')'),
        ),
        cnf_disjunction,
    ))(input)
}

fn cnf_disjunction(input: &str) -> IResult<&str, Vec<RawLiteral>> {
    separated_list1(
        |i| {
            let (i, _) = multispace0(i)?;
            let (i, _) = char('|')(i)?;
            let (i, _) = multispace0(i)?;
            Ok((i, ()))
        },
        cnf_literal,
    )(input)
}

fn cnf_literal(input: &str) -> IResult<&str, RawLiteral> {
    let (input, negated) = opt(char('~'))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, (atom, positive)) = atom_maybe_infix(input)?;
    let (input, _) = multispace0(input)?;
    Ok((
        input,
        RawLiteral {
            polarity: positive != negated.is_some(),
            atom,
        },
    ))
}

// --- FOF formulas ---

fn fof_formula(input: &str) -> IResult<&str, RawFormula> {
    fof_binary(input)
}

/// Binary formula, right-recursive; longer operators first.
fn fof_binary(input: &str) -> IResult<&str, RawFormula> {
    let (input, left) = fof_unary(input)?;
    let (input, _) = multispace0(input)?;

    let op_parse: IResult<&str, &str> = alt((
        tag("<=>"),
        tag("<~>"),
        tag("=>"),
        tag("<="),
        tag("~|"),
        tag("~&"),
        tag("|"),
        tag("&"),
    ))(input);

    let Ok((input, op)) = op_parse else {
        return Ok((input, left));
    };
    let (input, _) = multispace0(input)?;
    let (input, right) = fof_binary(input)?;

    let combined = match op {
        "<=>" => RawFormula::Iff(Box::new(left), Box::new(right)),
        "<~>" => RawFormula::Xor(Box::new(left), Box::new(right)),
        "=>" => RawFormula::Implies(Box::new(left), Box::new(right)),
        // Reverse implication: `p <= q` is `q => p`
        "<=" => RawFormula::Implies(Box::new(right), Box::new(left)),
        "~|" => RawFormula::Nor(Box::new(left), Box::new(right)),
        "~&" => RawFormula::Nand(Box::new(left), Box::new(right)),
        "|" => RawFormula::Or(Box::new(left), Box::new(right)),
        "&" => RawFormula::And(Box::new(left), Box::new(right)),
        _ => unreachable!(),
    };
    Ok((input, combined))
}

fn fof_unary(input: &str) -> IResult<&str, RawFormula> {
    alt((fof_negation, fof_quantified, fof_parenthesized, fof_atomic))(input)
}

fn fof_negation(input: &str) -> IResult<&str, RawFormula> {
    let (input, _) = char('~')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, inner) = fof_unary(input)?;
    Ok((input, RawFormula::Not(Box::new(inner))))
}

fn fof_quantified(input: &str) -> IResult<&str, RawFormula> {
    let (input, quantifier) = alt((
        value(Quantifier::Forall, char('!')),
        value(Quantifier::Exists, char('?')),
    ))(input)?;
    let (input, _) = multispace0(input)?;
    let (input, vars) = delimited(
        char('['),
        separated_list1(statement_comma_like, |i| {
            let (i, _) = multispace0(i)?;
            let (i, v) = upper_word(i)?;
            let (i, _) = multispace0(i)?;
            Ok((i, v.to_string()))
        }),
        char(']'),
    )(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char(':')(input)?;
    let (input, _) = multispace0(input)?;
    let (input, body) = fof_unary(input)?;
    Ok((input, RawFormula::Quantified(quantifier, vars, Box::new(body))))
}

fn fof_parenthesized(input: &str) -> IResult<&str, RawFormula> {
    delimited(
        char('('),
        |i| {
            let (i, _) = multispace0(i)?;
            let (i, f) = fof_formula(i)?;
            let (i, _) = multispace0(i)?;
            Ok((i, f))
        },
        char(')'),
    )(input)
}

fn fof_atomic(input: &str) -> IResult<&str, RawFormula> {
    let (input, (atom, positive)) = atom_maybe_infix(input)?;
    let formula = RawFormula::Atom(atom);
    if positive {
        Ok((input, formula))
    } else {
        Ok((input, RawFormula::Not(Box::new(formula))))
    }
}

// =========================================================================
// Lowering onto the interned data model
// =========================================================================

/// Interns symbols and enforces fixed arities across the problem.
struct Lowerer {
    interner: Interner,
    function_arities: HashMap<String, usize>,
    predicate_arities: HashMap<String, usize>,
}

impl Lowerer {
    fn new() -> Self {
        Lowerer {
            interner: Interner::new(),
            function_arities: HashMap::new(),
            predicate_arities: HashMap::new(),
        }
    }

    fn check_arity(
        map: &mut HashMap<String, usize>,
        symbol: &str,
        arity: usize,
    ) -> Result<(), ParseError> {
        match map.get(symbol) {
            Some(&known) if known != arity => Err(ParseError::ArityMismatch {
                symbol: symbol.to_string(),
                first: known,
                second: arity,
            }),
            Some(_) => Ok(()),
            None => {
                map.insert(symbol.to_string(), arity);
                Ok(())
            }
        }
    }

    fn lower_term(&mut self, term: &RawTerm, line: usize) -> Result<Term, ParseError> {
        match term {
            RawTerm::Var(name) => Ok(Term::Variable(Variable::new(
                self.interner.intern_variable(name),
            ))),
            RawTerm::App(name, args) => {
                Self::check_arity(&mut self.function_arities, name, args.len())?;
                if args.is_empty() {
                    Ok(Term::Constant(Constant::new(
                        self.interner.intern_constant(name),
                    )))
                } else {
                    if args.len() > u8::MAX as usize {
                        return Err(ParseError::Unsupported {
                            line,
                            detail: format!("function '{}' with arity {}", name, args.len()),
                        });
                    }
                    let id = self.interner.intern_function(name);
                    let lowered = args
                        .iter()
                        .map(|arg| self.lower_term(arg, line))
                        .collect::<Result<Vec<_>, _>>()?;
                    Ok(Term::Function(
                        FunctionSymbol::new(id, lowered.len() as u8),
                        lowered,
                    ))
                }
            }
        }
    }

    fn lower_atom(&mut self, atom: &RawAtom, line: usize) -> Result<Atom, ParseError> {
        Self::check_arity(&mut self.predicate_arities, &atom.predicate, atom.args.len())?;
        if atom.args.len() > u8::MAX as usize {
            return Err(ParseError::Unsupported {
                line,
                detail: format!(
                    "predicate '{}' with arity {}",
                    atom.predicate,
                    atom.args.len()
                ),
            });
        }
        let id = self.interner.intern_predicate(&atom.predicate);
        let args = atom
            .args
            .iter()
            .map(|arg| self.lower_term(arg, line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Atom::new(PredicateSymbol::new(id, args.len() as u8), args))
    }

    fn lower_cnf(
        &mut self,
        role: &str,
        literals: &[RawLiteral],
        line: usize,
    ) -> Result<Clause, ParseError> {
        let mut lowered = Vec::with_capacity(literals.len());
        for lit in literals {
            let atom = self.lower_atom(&lit.atom, line)?;
            lowered.push(Literal::new(atom, lit.polarity, &mut self.interner));
        }
        Ok(Clause::with_role(lowered, ClauseRole::from_tptp_role(role)))
    }

    fn lower_formula(&mut self, formula: &RawFormula, line: usize) -> Result<FofFormula, ParseError> {
        Ok(match formula {
            RawFormula::Atom(atom) => FofFormula::Atom(self.lower_atom(atom, line)?),
            RawFormula::Not(f) => FofFormula::Not(Box::new(self.lower_formula(f, line)?)),
            RawFormula::And(f1, f2) => FofFormula::And(
                Box::new(self.lower_formula(f1, line)?),
                Box::new(self.lower_formula(f2, line)?),
            ),
            RawFormula::Or(f1, f2) => FofFormula::Or(
                Box::new(self.lower_formula(f1, line)?),
                Box::new(self.lower_formula(f2, line)?),
            ),
            RawFormula::Implies(f1, f2) => FofFormula::Implies(
                Box::new(self.lower_formula(f1, line)?),
                Box::new(self.lower_formula(f2, line)?),
            ),
            RawFormula::Iff(f1, f2) => FofFormula::Iff(
                Box::new(self.lower_formula(f1, line)?),
                Box::new(self.lower_formula(f2, line)?),
            ),
            RawFormula::Xor(f1, f2) => FofFormula::Xor(
                Box::new(self.lower_formula(f1, line)?),
                Box::new(self.lower_formula(f2, line)?),
            ),
            RawFormula::Nand(f1, f2) => FofFormula::Nand(
                Box::new(self.lower_formula(f1, line)?),
                Box::new(self.lower_formula(f2, line)?),
            ),
            RawFormula::Nor(f1, f2) => FofFormula::Nor(
                Box::new(self.lower_formula(f1, line)?),
                Box::new(self.lower_formula(f2, line)?),
            ),
            RawFormula::Quantified(quantifier, vars, body) => {
                let mut result = self.lower_formula(body, line)?;
                for name in vars.iter().rev() {
                    let var = Variable::new(self.interner.intern_variable(name));
                    result = FofFormula::Quantified(*quantifier, var, Box::new(result));
                }
                result
            }
        })
    }
}

/// Lower all statements and clausify the FOF part. Conjectures are
/// negated: several conjectures prove their conjunction, so the negated
/// formula is the disjunction of the negations.
fn lower_problem(statements: Vec<(usize, Statement)>) -> Result<ParsedProblem, ParseError> {
    let mut lowerer = Lowerer::new();
    let mut clauses = Vec::new();
    let mut fof_formulas: Vec<(usize, NamedFormula)> = Vec::new();
    let mut is_fof = false;

    for (line, statement) in &statements {
        match statement {
            Statement::Cnf { role, literals } => {
                clauses.push(lowerer.lower_cnf(role, literals, *line)?);
            }
            Statement::Fof { role, formula } => {
                is_fof = true;
                let role = FormulaRole::from_str(role).ok_or_else(|| ParseError::UnknownRole {
                    role: role.clone(),
                })?;
                let formula = lowerer.lower_formula(formula, *line)?;
                fof_formulas.push((
                    *line,
                    NamedFormula {
                        name: String::new(),
                        role,
                        formula,
                    },
                ));
            }
            Statement::Include(_) => unreachable!("includes are resolved during collection"),
        }
    }

    let mut conjectures = Vec::new();
    let mut others = Vec::new();
    for (_, named) in fof_formulas {
        match named.role {
            FormulaRole::Conjecture => conjectures.push(named.formula),
            _ => others.push(named),
        }
    }
    let has_conjecture = !conjectures.is_empty();

    let mut interner = lowerer.interner;
    let mut converter = CnfConverter::new(&mut interner);

    for named in others {
        let role = match named.role {
            FormulaRole::Hypothesis => ClauseRole::Hypothesis,
            FormulaRole::Definition => ClauseRole::Definition,
            FormulaRole::NegatedConjecture => ClauseRole::NegatedConjecture,
            _ => ClauseRole::Axiom,
        };
        clauses.extend(converter.convert(named.formula, role));
    }

    if let Some(first) = conjectures.pop() {
        let negated = conjectures
            .into_iter()
            .rev()
            .fold(FofFormula::Not(Box::new(first)), |acc, conjecture| {
                FofFormula::Or(Box::new(FofFormula::Not(Box::new(conjecture))), Box::new(acc))
            });
        clauses.extend(converter.convert(negated, ClauseRole::NegatedConjecture));
    }

    Ok(ParsedProblem {
        formula: CnfFormula { clauses },
        interner,
        is_fof,
        has_conjecture,
    })
}
