use std::{cell::RefCell, rc::Rc};

use tracing::trace;

use crate::{
    ast::TypeName,
    error::RuntimeError,
    interpreter::{
        evaluator::{core::EvalResult, function::builtin},
        value::core::Value,
    },
};

/// Which bindings of a scope an [`Environment`] handle can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Every binding.
    All,
    /// Only bindings holding user-defined functions, read-only. Functions
    /// defined at global scope capture the global scope through this view.
    FunctionsOnly,
}

/// A named slot in a scope.
struct Binding {
    name:  String,
    value: Value,
    ty:    TypeName,
}

/// One level of the scope chain.
#[derive(Default)]
struct Scope {
    bindings: Vec<Binding>,
    parent:   Option<Environment>,
}

impl Scope {
    fn position(&self, name: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.name == name)
    }
}

/// A handle to a scope and, through its parents, to the whole visible chain.
///
/// Handles are cheap to clone and share the scope they point at, so a scope
/// captured by a closure stays alive and mutable for as long as the closure
/// does. The scope with no parent is the global scope; once it is exhausted,
/// lookups fall back to the built-in functions.
#[derive(Clone)]
pub struct Environment {
    scope: Rc<RefCell<Scope>>,
    view:  View,
}

/// Where a name resolved.
enum Resolved {
    /// In a user scope visible through the given handle.
    Scope(Environment),
    /// In the built-in table.
    Builtin(&'static builtin::BuiltinDef),
}

impl Environment {
    /// Creates an empty global scope.
    #[must_use]
    pub fn global() -> Self {
        Self { scope: Rc::new(RefCell::new(Scope::default())),
               view:  View::All, }
    }

    /// Creates an empty scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        trace!("new scope");
        Self { scope: Rc::new(RefCell::new(Scope { bindings: Vec::new(),
                                                   parent:   Some(self.clone()), })),
               view:  View::All, }
    }

    /// Returns a read-only handle to the same scope that only exposes
    /// function bindings.
    #[must_use]
    pub fn functions_only(&self) -> Self {
        Self { scope: Rc::clone(&self.scope),
               view:  View::FunctionsOnly, }
    }

    /// Returns `true` if this is the global scope.
    #[must_use]
    pub fn is_global(&self) -> bool {
        self.scope.borrow().parent.is_none()
    }

    /// Returns the view this handle sees its scope through.
    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    fn parent(&self) -> Option<Self> {
        self.scope.borrow().parent.clone()
    }

    /// Returns `true` if the binding at `index` is visible through this
    /// handle.
    fn exposes(&self, scope: &Scope, index: usize) -> bool {
        self.view == View::All || matches!(scope.bindings[index].value, Value::Function(_))
    }

    /// Searches this scope only, honouring the view.
    fn find_local(&self, name: &str) -> Option<usize> {
        let scope = self.scope.borrow();
        scope.position(name).filter(|&index| self.exposes(&scope, index))
    }

    /// Walks the chain, then the built-ins.
    fn resolve(&self, name: &str) -> Option<Resolved> {
        let mut current = Some(self.clone());
        while let Some(env) = current {
            if env.find_local(name).is_some() {
                return Some(Resolved::Scope(env));
            }
            current = env.parent();
        }
        builtin::find(name).map(Resolved::Builtin)
    }

    /// Returns `true` if `name` resolves anywhere in the visible chain,
    /// built-ins included.
    #[must_use]
    pub fn resolves(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Looks a name up without raising an error.
    ///
    /// # Returns
    /// A clone of the bound value; arrays come back as shared handles.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        match self.resolve(name)? {
            Resolved::Scope(env) => {
                let scope = env.scope.borrow();
                scope.position(name).map(|index| scope.bindings[index].value.clone())
            },
            Resolved::Builtin(def) => Some(Value::Builtin(def)),
        }
    }

    /// Looks a name up through the chain, then the built-ins.
    ///
    /// # Parameters
    /// - `name`: The name to resolve.
    /// - `line`: Source code line number for error reporting.
    ///
    /// # Returns
    /// - `Ok(Value)`: The bound value.
    /// - `Err(RuntimeError::UndefinedIdentifier)`: If nothing binds `name`.
    pub fn lookup(&self, name: &str, line: usize) -> EvalResult<Value> {
        self.get(name)
            .ok_or_else(|| RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                               line })
    }

    /// Declares a new binding in this scope.
    ///
    /// The binding starts as `null` with the given declared type. If a value
    /// is supplied it is then stored through [`Environment::update`], so type
    /// elevation applies.
    ///
    /// # Errors
    /// - `RuntimeError::Redeclaration` if `name` already resolves anywhere in
    ///   the visible chain, built-ins included.
    /// - Any error from [`Environment::update`].
    pub fn add(&self, ty: TypeName, name: &str, value: Option<Value>, line: usize) -> EvalResult<()> {
        if self.resolves(name) {
            return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                     line });
        }
        self.declare(ty, name, value, line)
    }

    /// Declares a new binding, checking only this scope for a clash.
    ///
    /// Used for parameters, which may shadow names from enclosing scopes.
    ///
    /// # Errors
    /// - `RuntimeError::Redeclaration` if this scope already binds `name`.
    /// - Any error from [`Environment::update`].
    pub fn local_add(&self, ty: TypeName, name: &str, value: Option<Value>, line: usize) -> EvalResult<()> {
        if self.scope.borrow().position(name).is_some() {
            return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                     line });
        }
        self.declare(ty, name, value, line)
    }

    fn declare(&self, ty: TypeName, name: &str, value: Option<Value>, line: usize) -> EvalResult<()> {
        trace!(name, %ty, "declare");
        self.scope.borrow_mut().bindings.push(Binding { name: name.to_string(),
                                                        value: Value::Null,
                                                        ty });
        match value {
            Some(value) => self.update(name, value, line),
            None => Ok(()),
        }
    }

    /// Replaces the value of an existing binding in whichever scope owns it.
    ///
    /// The value is elevated to the binding's declared type first.
    ///
    /// # Errors
    /// - `RuntimeError::UndefinedIdentifier` if `name` does not resolve.
    /// - `RuntimeError::CapturedBinding` if the owning scope is only seen
    ///   through a function-only view.
    /// - `RuntimeError::Redeclaration` if `name` is a built-in.
    /// - `RuntimeError::TypeMismatch` if elevation fails.
    pub fn update(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        let owner = match self.resolve(name) {
            Some(Resolved::Scope(env)) => env,
            Some(Resolved::Builtin(_)) => {
                return Err(RuntimeError::Redeclaration { name: name.to_string(),
                                                         line });
            },
            None => {
                return Err(RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                               line });
            },
        };
        if owner.view == View::FunctionsOnly {
            return Err(RuntimeError::CapturedBinding { name: name.to_string(),
                                                       line });
        }

        let mut scope = owner.scope.borrow_mut();
        let Some(index) = scope.position(name) else {
            return Err(RuntimeError::UndefinedIdentifier { name: name.to_string(),
                                                           line });
        };
        let binding = &mut scope.bindings[index];
        binding.value = value.elevate(&binding.ty, name, line)?;
        Ok(())
    }

    /// Updates `name` if it resolves, otherwise declares it untyped here.
    ///
    /// This is what a plain `name = expr` does.
    pub fn add_or_update(&self, name: &str, value: Value, line: usize) -> EvalResult<()> {
        if self.resolves(name) {
            self.update(name, value, line)
        } else {
            self.declare(TypeName::Any, name, Some(value), line)
        }
    }

    /// Copies the visible chain so later changes on either side are not
    /// shared.
    ///
    /// Every scope seen in full is copied, with arrays deep-copied. A scope
    /// seen through a function-only view is kept as the same handle: it only
    /// exposes functions, and sharing it keeps global functions defined later
    /// reachable.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        if self.view == View::FunctionsOnly {
            return self.clone();
        }
        let scope = self.scope.borrow();
        let bindings = scope.bindings
                            .iter()
                            .map(|b| Binding { name:  b.name.clone(),
                                               value: b.value.deep_copy(),
                                               ty:    b.ty.clone(), })
                            .collect();
        let parent = scope.parent.as_ref().map(Self::snapshot);

        Self { scope: Rc::new(RefCell::new(Scope { bindings, parent })),
               view:  View::All, }
    }

    /// The names bound in this scope, in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let scope = self.scope.borrow();
        (0..scope.bindings.len()).filter(|&index| self.exposes(&scope, index))
                                 .map(|index| scope.bindings[index].name.clone())
                                 .collect()
    }
}

/// Dumps this scope's bindings, one `name: value` line each.
impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let scope = self.scope.borrow();
        for (index, binding) in scope.bindings.iter().enumerate() {
            if self.exposes(&scope, index) {
                writeln!(f, "{}: {}", binding.name, binding.value)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Environment")
         .field("view", &self.view)
         .field("names", &self.names())
         .finish_non_exhaustive()
    }
}
