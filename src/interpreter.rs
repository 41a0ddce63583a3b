/// The environment module manages scopes and name bindings.
///
/// Scopes form a parent chain ending at the global scope, followed by the
/// built-in functions. Every binding carries its declared type, and values
/// stored into it are elevated to that type.
///
/// # Responsibilities
/// - Declares, updates and resolves names along the scope chain.
/// - Provides the two closure capture modes: a functions-only view of the
///   global scope and a deep snapshot of a nested chain.
pub mod environment;
/// The evaluator module executes the assembled program.
///
/// The evaluator walks statements and expressions, applies operators, calls
/// functions and propagates `return` through nested blocks.
///
/// # Responsibilities
/// - Evaluates expressions and executes statements in an explicit scope.
/// - Implements closures, variadic parameters and argument unpacking.
/// - Reports the first runtime error and stops.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// tagged with its source line. Leading whitespace becomes indentation tokens
/// so later phases can recover block structure.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with line numbers.
/// - Handles numeric and string literals, keywords, identifiers and
///   operators.
/// - Reports unknown characters and unterminated strings or comments.
pub mod lexer;
/// The parser module builds the program tree from tokens.
///
/// Parsing happens line by line. Tokens are grouped into logical lines, each
/// line becomes one statement, and the block assembler nests statements into
/// bodies by indentation.
///
/// # Responsibilities
/// - Parses expressions with their precedence tiers.
/// - Parses one statement per line and recovers from bad lines.
/// - Nests blocks and folds conditional chains.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and the user function type.
/// - Implements printing, truthiness, deep copying and type elevation.
pub mod value;
