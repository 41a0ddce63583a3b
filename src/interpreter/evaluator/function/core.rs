use std::rc::Rc;

use tracing::trace;

use crate::{
    ast::{Expr, Params, Statement, TypeName},
    error::RuntimeError,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Flow, Interpreter},
        value::{core::Value, function::Function},
    },
};

impl Interpreter<'_> {
    /// Defines a named function in `env`.
    ///
    /// What the function captures depends on where it is defined:
    ///
    /// 1. **Global scope:** a read-only view of the global scope that only
    ///    exposes functions. Functions defined later are visible to it, so
    ///    top-level functions can call each other regardless of order.
    ///
    /// 2. **Any other scope:** a deep copy of the visible chain, taken now.
    ///    Later changes to the defining scope are not seen. The function is
    ///    also bound inside its own copy so it can recurse.
    ///
    /// # Errors
    /// `Redeclaration` if `name` is already visible in `env`.
    pub(crate) fn define_function(name: &str,
                                  return_type: &TypeName,
                                  params: &Params,
                                  body: Rc<[Statement]>,
                                  line: usize,
                                  env: &Environment)
                                  -> EvalResult<()> {
        let nested = !env.is_global();
        let captured = if nested { env.snapshot() } else { env.functions_only() };

        let function = Rc::new(Function { name: name.to_string(),
                                          params: params.clone(),
                                          return_type: return_type.clone(),
                                          body,
                                          env: captured.clone() });
        trace!(name, nested, "defining function");

        env.add(TypeName::Any, name, Some(Value::Function(Rc::clone(&function))), line)?;
        if nested {
            captured.local_add(TypeName::Any, name, Some(Value::Function(function)), line)?;
        }
        Ok(())
    }

    /// Defines `lambda name = (params) => expr`, a function whose body
    /// returns `expr`.
    pub(crate) fn define_lambda(name: &str,
                                params: &Params,
                                body: &Expr,
                                line: usize,
                                env: &Environment)
                                -> EvalResult<()> {
        let body: Rc<[Statement]> = vec![Statement::Return { value: Some(body.clone()),
                                                             line }].into();
        Self::define_function(name, &TypeName::Any, params, body, line, env)
    }

    /// Evaluates a call expression.
    ///
    /// The callee is evaluated first, then the arguments from left to right.
    ///
    /// # Errors
    /// - `NotCallable` if the callee is not a function.
    /// - `UnpackNonArray` if a `*` argument is not an array.
    /// - Any error raised by the call itself.
    pub(crate) fn eval_call(&mut self,
                            callee: &Expr,
                            args: &[Expr],
                            line: usize,
                            env: &Environment)
                            -> EvalResult<Value> {
        let callee = self.eval(callee, env)?;
        let args = self.eval_arguments(args, env)?;
        self.call_value(&callee, args, line)
    }

    /// Evaluates an argument list, splicing `*array` arguments in place.
    fn eval_arguments(&mut self, args: &[Expr], env: &Environment) -> EvalResult<Vec<Value>> {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            match arg {
                Expr::Unpack { expr, line } => match self.eval(expr, env)? {
                    Value::Array(items) => values.extend(items.borrow().iter().cloned()),
                    other => {
                        return Err(RuntimeError::UnpackNonArray { kind: other.type_name(),
                                                                  line: *line });
                    },
                },
                _ => values.push(self.eval(arg, env)?),
            }
        }
        Ok(values)
    }

    /// Calls a function value with already evaluated arguments.
    ///
    /// # Example
    /// ```
    /// use quadra::interpreter::{environment::Environment, evaluator::core::Interpreter, value::core::Value};
    ///
    /// let mut out = Vec::new();
    /// let mut interpreter = Interpreter::with_output(&mut out);
    /// let len = Environment::global().lookup("len", 1).unwrap();
    ///
    /// let result = interpreter.call_value(&len, vec!["abc".into()], 1).unwrap();
    /// assert_eq!(result, Value::Int(3));
    /// ```
    pub fn call_value(&mut self, callee: &Value, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        match callee {
            Value::Builtin(def) => {
                if !def.arity.check(args.len()) {
                    return Err(RuntimeError::ArgumentCountMismatch { name: def.name.to_string(),
                                                                     expected: def.arity.to_string(),
                                                                     found: args.len(),
                                                                     line });
                }
                (def.func)(&args, self.output(), line)
            },
            Value::Function(function) => self.call_function(function, args, line),
            other => Err(RuntimeError::NotCallable { kind: other.type_name(),
                                                     line }),
        }
    }

    /// Runs a user-defined function.
    ///
    /// Positional parameters are bound in order with their declared types in
    /// a fresh child of the captured environment. A variadic parameter
    /// receives the remaining arguments as a new array. The result is the
    /// value of the first `return` reached, or `null`, elevated to the
    /// declared return type.
    fn call_function(&mut self, function: &Function, args: Vec<Value>, line: usize) -> EvalResult<Value> {
        let positional = &function.params.positional;
        let accepted = if function.params.variadic.is_some() {
            args.len() >= positional.len()
        } else {
            args.len() == positional.len()
        };
        if !accepted {
            return Err(RuntimeError::ArgumentCountMismatch { name: function.name.clone(),
                                                             expected: function.expected_arity(),
                                                             found: args.len(),
                                                             line });
        }

        trace!(name = %function.name, args = args.len(), "call");
        let scope = function.env.child();
        let mut args = args.into_iter();
        for (param, value) in positional.iter().zip(args.by_ref()) {
            scope.local_add(param.ty.clone(), &param.name, Some(value), line)?;
        }
        if let Some(rest) = &function.params.variadic {
            scope.local_add(TypeName::Array(Box::new(TypeName::Any)),
                            rest,
                            Some(args.collect::<Vec<_>>().into()),
                            line)?;
        }

        let result = match self.exec_block(&function.body, &scope)? {
            Flow::Return(value) => value,
            Flow::Normal => Value::Null,
        };
        trace!(name = %function.name, %result, "return");
        result.elevate(&function.return_type, &function.name, line)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::ast::Param;

    fn params(names: &[&str], variadic: Option<&str>) -> Params {
        Params { positional: names.iter()
                                  .map(|name| Param { ty:   TypeName::Any,
                                                      name: (*name).to_string(), })
                                  .collect(),
                 variadic:   variadic.map(str::to_string), }
    }

    fn identity(name: &str, params: Params, env: &Environment) {
        let first = params.positional
                          .first()
                          .map(|p| p.name.clone())
                          .or_else(|| params.variadic.clone())
                          .unwrap();
        let body = Expr::Identifier { name: first, line: 1 };
        Interpreter::define_lambda(name, &params, &body, 1, env).unwrap();
    }

    #[test]
    fn variadic_parameter_collects_the_rest() {
        let env = Environment::global();
        identity("rest", params(&[], Some("xs")), &env);

        let mut interpreter = Interpreter::with_output(std::io::sink());
        let callee = env.lookup("rest", 1).unwrap();
        let result = interpreter.call_value(&callee, vec![Value::Int(1), Value::Int(2)], 1)
                                .unwrap();
        assert_eq!(result.to_string(), "[1, 2]");
    }

    #[test]
    fn wrong_argument_count_is_reported() {
        let env = Environment::global();
        identity("id", params(&["x"], None), &env);

        let mut interpreter = Interpreter::with_output(std::io::sink());
        let callee = env.lookup("id", 1).unwrap();
        assert!(matches!(interpreter.call_value(&callee, Vec::new(), 4),
                         Err(RuntimeError::ArgumentCountMismatch { found: 0, line: 4, .. })));
    }

    #[test]
    fn only_functions_are_callable() {
        let mut interpreter = Interpreter::with_output(std::io::sink());
        assert!(matches!(interpreter.call_value(&Value::Int(3), Vec::new(), 2),
                         Err(RuntimeError::NotCallable { kind: "int", line: 2 })));
    }

    #[test]
    fn nested_definitions_can_recurse() {
        let env = Environment::global().child();
        identity("inner", params(&["x"], None), &env);

        let Value::Function(function) = env.lookup("inner", 1).unwrap() else {
            panic!("expected a function");
        };
        assert!(function.env.resolves("inner"));
    }
}
