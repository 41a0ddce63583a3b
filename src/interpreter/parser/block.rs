use tracing::trace;

use crate::{
    ast::Statement,
    error::{Diagnostics, SyntaxError},
};

/// An open block: the statement that opened it and the body collected so
/// far. The root frame has no opener.
struct Frame {
    depth:  usize,
    opener: Option<Statement>,
    body:   Vec<Statement>,
}

impl Frame {
    const fn new(depth: usize, opener: Option<Statement>) -> Self {
        Self { depth,
               opener,
               body: Vec::new() }
    }
}

/// Nests parsed lines into blocks by indentation depth.
///
/// The assembler keeps a stack of open blocks. For each `(depth, statement)`:
/// - a depth deeper than the innermost open block is an
///   [`SyntaxError::UnexpectedIndent`] and the line is dropped;
/// - a shallower depth closes blocks until the depths match, installing each
///   closed body into its opener;
/// - the statement is appended to the innermost block, and if it opens a
///   block of its own, a new frame is pushed one level deeper.
///
/// A [`Statement::Error`] also opens a frame, so that the indented body of a
/// header that failed to parse is absorbed instead of producing a cascade of
/// indentation errors.
///
/// When a block closes, runs of `if` / `else if` / `else` in its body are
/// folded into [`Statement::Conditional`].
///
/// # Parameters
/// - `lines`: Parsed lines paired with their indentation depth.
/// - `diagnostics`: Collector for syntax errors.
///
/// # Returns
/// The top-level statements of the program.
pub fn assemble(lines: Vec<(usize, Statement)>, diagnostics: &mut Diagnostics) -> Vec<Statement> {
    let mut stack = vec![Frame::new(0, None)];

    for (depth, statement) in lines {
        let top = stack.last().map_or(0, |frame| frame.depth);
        if depth > top {
            diagnostics.report(SyntaxError::UnexpectedIndent { expected: top,
                                                               found:    depth,
                                                               line:     statement.line(), });
            continue;
        }
        while stack.last().is_some_and(|frame| depth < frame.depth) {
            close_frame(&mut stack, diagnostics);
        }

        if statement.opens_block() || matches!(statement, Statement::Error { .. }) {
            trace!(depth, line = statement.line(), "open block");
            stack.push(Frame::new(depth + 1, Some(statement)));
        } else if let Some(frame) = stack.last_mut() {
            frame.body.push(statement);
        }
    }

    while stack.len() > 1 {
        close_frame(&mut stack, diagnostics);
    }

    stack.pop()
         .map(|root| fold_conditionals(root.body, diagnostics))
         .unwrap_or_default()
}

/// Pops the innermost frame and appends its finished opener to the parent.
fn close_frame(stack: &mut Vec<Frame>, diagnostics: &mut Diagnostics) {
    let Some(frame) = stack.pop() else {
        return;
    };
    let Some(mut opener) = frame.opener else {
        return;
    };

    opener.attach_body(fold_conditionals(frame.body, diagnostics));
    if let Some(parent) = stack.last_mut() {
        parent.body.push(opener);
    }
}

/// Folds `If`, `ElseIf` and `Else` runs within one body into
/// [`Statement::Conditional`] nodes.
///
/// An `else if` or `else` continues the chain opened by the statement
/// directly before it. One with no open chain to attach to is reported as an
/// [`SyntaxError::OrphanElse`] and replaced by an error placeholder. An
/// `else` closes its chain.
///
/// # Parameters
/// - `body`: One block's statements, in source order.
/// - `diagnostics`: Collector for syntax errors.
///
/// # Returns
/// The body with every conditional chain folded.
pub fn fold_conditionals(body: Vec<Statement>, diagnostics: &mut Diagnostics) -> Vec<Statement> {
    let mut folded: Vec<Statement> = Vec::with_capacity(body.len());
    let mut chain_open = false;

    for statement in body {
        match statement {
            Statement::If(branch) => {
                let line = branch.line;
                folded.push(Statement::Conditional { branches: vec![branch],
                                                     otherwise: None,
                                                     line });
                chain_open = true;
            },
            Statement::ElseIf(branch) => match folded.last_mut() {
                Some(Statement::Conditional { branches, .. }) if chain_open => branches.push(branch),
                _ => orphan(&mut folded, "else if", branch.line, diagnostics),
            },
            Statement::Else { body, line } => {
                match folded.last_mut() {
                    Some(Statement::Conditional { otherwise, .. }) if chain_open => {
                        *otherwise = Some(body);
                    },
                    _ => orphan(&mut folded, "else", line, diagnostics),
                }
                chain_open = false;
            },
            other => {
                folded.push(other);
                chain_open = false;
            },
        }
    }

    folded
}

fn orphan(folded: &mut Vec<Statement>,
          keyword: &'static str,
          line: usize,
          diagnostics: &mut Diagnostics) {
    diagnostics.report(SyntaxError::OrphanElse { keyword, line });
    folded.push(Statement::Error { line });
}
