//! Documentation content for the infa-expr CLI

use super::CliError;
use crate::functions::{FUNCTION_NAMES, FunctionRegistry};

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Syntax,
    Operators,
    Functions,
    Variables,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" => Some(Self::Syntax),
            "operators" | "ops" => Some(Self::Operators),
            "functions" | "function" | "fns" => Some(Self::Functions),
            "variables" | "variable" | "vars" | "params" => Some(Self::Variables),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"INFA-EXPR DOCUMENTATION

infa-expr evaluates transformation-language formulas against typed variables
and prints the resulting value as text.

DOCUMENTATION CATEGORIES

  syntax            Literals, comments, parentheses and function calls
  operators         Operators and how tightly they bind
  functions         Which functions parse and which evaluate
  variables         Supplying variables and string parameters

QUICK REFERENCE

  infa-expr eval "ABS(-250)"                        250.000000
  infa-expr eval "CONCAT(first, 'x')" --var first:STRING=a
  infa-expr parse "1 + 2 * 3" --pretty              print the tree as JSON
  infa-expr tokens "LTRIM(' a ')"                   list the tokens

Run 'infa-expr doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Syntax) => Ok(SYNTAX_DOC),
        Some(DocCategory::Operators) => Ok(OPERATORS_DOC),
        Some(DocCategory::Functions) => Ok(FUNCTIONS_DOC),
        Some(DocCategory::Variables) => Ok(VARIABLES_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

/// One line per catalog function, implemented ones marked with `*`
pub fn list_functions(registry: &FunctionRegistry) -> String {
    let mut out = String::new();
    for name in FUNCTION_NAMES {
        let mark = if registry.contains(name) { '*' } else { ' ' };
        out.push_str(&format!("{} {}\n", mark, name));
    }
    out
}

const SYNTAX_DOC: &str = r#"SYNTAX

LITERALS
  42  -1.1  3.0     Numbers. Stored with exactly six decimals: 2 -> 2.000000
  'text'            Strings, single quoted, no escapes. Use CHR(39) for a quote.
  NULL              The null value

COMMENTS
  -- to end of line
  // to end of line

GROUPING AND CALLS
  (1 + 2) * 3       Parentheses override precedence
  ABS(x)            Function names are upper case and must be followed by '('
  LTRIM(s, 'xy')    Arguments are separated by commas

NOTE
  A '-' directly followed by a digit is part of the number: write 5 - 2,
  not 5-2.
"#;

const OPERATORS_DOC: &str = r#"OPERATORS

From tightest to loosest binding. All are left-associative.

  *  /  %                 multiply, divide, modulo
  +  -                    add, subtract
  ||                      string concatenation
  <  <=  >  >=            ordering
  =  <>  !=  ^=           equality (the last three all mean "not equal")
  AND
  OR

  1 + 2 * 3               parses as 1 + (2 * 3)
  1 - 2 - 3               parses as (1 - 2) - 3

Operators are parsed but not evaluated by the built-in function set:
'infa-expr parse' shows their tree, 'infa-expr eval' reports them as
unimplemented.
"#;

const FUNCTIONS_DOC: &str = r#"FUNCTIONS

Every function of the language is recognised by the parser. Only these are
evaluated:

  ABS(n)                  absolute value; ABS(NULL) is NULL
  CHR(n)                  character with code n (truncated); CHR(NULL) is NULL
  CONCAT(a, b)            a followed by b; a NULL side yields the other side
  LTRIM(s [, set])        strip leading spaces, or leading chars found in set
  RTRIM(s [, set])        strip trailing spaces, or trailing chars found in set

Run 'infa-expr functions' for the full list.
"#;

const VARIABLES_DOC: &str = r#"VARIABLES

Identifiers that are not function names must match a supplied variable.
Each variable has a name, a type (NUMBER, STRING or NULL) and a value.

  --var in_AMT:NUMBER=2
  --var name:STRING=Bender
  --vars '[{"name": "in_AMT", "type": "NUMBER", "value": 2}]'

NUMBER values are normalised to six decimals when substituted.

PARAMETERS
  Variables whose name starts with '$' are parameters. Besides being usable
  as identifiers, every occurrence of a parameter name inside a string literal
  is replaced by its value, parameters applied in the order given:

  --var '$$Region:STRING=EU'  "CONCAT('region=$$Region', '')"  ->  region=EU
"#;
