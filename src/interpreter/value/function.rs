use std::rc::Rc;

use crate::{
    ast::{Params, Statement, TypeName},
    interpreter::environment::Environment,
};

/// A user-defined function value.
///
/// Created when a `func` or `lambda` statement runs. The body is shared with
/// the statement that defined it; the environment is whatever was captured
/// at definition time.
pub struct Function {
    /// The name the function was defined under.
    pub name:        String,
    /// Parameter list.
    pub params:      Params,
    /// Declared return type; [`TypeName::Any`] when none was written.
    pub return_type: TypeName,
    /// The statements of the body.
    pub body:        Rc<[Statement]>,
    /// The captured environment each call's scope is parented to.
    pub env:         Environment,
}

impl Function {
    /// Describes how many arguments the function accepts, for arity errors.
    ///
    /// # Example
    /// ```
    /// use quadra::ast::{Param, Params, TypeName};
    /// use quadra::interpreter::{environment::Environment, value::function::Function};
    ///
    /// let params = Params { positional: vec![Param { ty:   TypeName::Any,
    ///                                                name: "a".into(), }],
    ///                       variadic:   Some("rest".into()), };
    /// let f = Function { name: "f".into(),
    ///                    params,
    ///                    return_type: TypeName::Any,
    ///                    body: Vec::new().into(),
    ///                    env: Environment::global() };
    ///
    /// assert_eq!(f.expected_arity(), "at least 1");
    /// ```
    #[must_use]
    pub fn expected_arity(&self) -> String {
        let count = self.params.positional.len();
        if self.params.variadic.is_some() { format!("at least {count}") } else { count.to_string() }
    }
}
