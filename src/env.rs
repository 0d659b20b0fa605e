use std::{
    fmt,
    io::{self, Write},
};

use rpds::Vector;

use crate::{
    builtin::{self, Builtin},
    error::LispError,
    value::Value,
};

#[derive(Debug, Clone, PartialEq)]
struct Binding {
    name: String,
    value: Value,
}

/// The table of global bindings plus the run flag checked by the read loop.
///
/// Bindings keep their insertion order. Redefining a name replaces the value
/// in its existing slot. Values only cross the boundary by deep clone.
pub struct Env {
    bindings: Vector<Binding>,
    running: bool,
    out: Box<dyn Write>,
}

impl Env {
    /// An empty environment that writes to stdout.
    pub fn new() -> Self {
        Env {
            bindings: Vector::new(),
            running: true,
            out: Box::new(io::stdout()),
        }
    }

    /// An environment with every builtin bound under its name.
    pub fn with_builtins() -> Self {
        let mut env = Env::new();
        builtin::add_builtins(&mut env);
        env
    }

    /// Replace the sink that `printenv` writes to.
    pub fn with_output<W>(self, out: W) -> Self
    where
        W: Write + 'static,
    {
        Env {
            out: Box::new(out),
            ..self
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.bindings.iter().position(|binding| binding.name == name)
    }

    /// Look up `name`, returning a copy of its value or an unbound symbol
    /// error.
    pub fn get(&self, name: &str) -> Value {
        match self.bindings.iter().find(|binding| binding.name == name) {
            Some(binding) => binding.value.clone(),
            None => LispError::Unbound(name.into()).into(),
        }
    }

    /// Bind a copy of `value` to `name`, replacing any existing binding in
    /// place.
    pub fn put(&mut self, name: &str, value: &Value) {
        let binding = Binding {
            name: name.into(),
            value: value.clone(),
        };
        match self.position(name) {
            Some(index) => {
                tracing::debug!(name, index, "rebinding");
                self.bindings.set_mut(index, binding);
            }
            None => {
                tracing::debug!(name, index = self.bindings.len(), "binding");
                self.bindings.push_back_mut(binding);
            }
        }
    }

    /// Bound names in slot order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.bindings.iter().map(|binding| binding.name.as_str())
    }

    /// The first name bound to `builtin`, if any.
    pub fn name_of(&self, builtin: Builtin) -> Option<&str> {
        self.bindings
            .iter()
            .find(|binding| binding.value == Value::Builtin(builtin))
            .map(|binding| binding.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Clear the run flag. The read loop stops before its next line.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// The sink that `printenv` and the read loop write to.
    pub fn output(&mut self) -> &mut dyn Write {
        &mut *self.out
    }

    /// Write every bound name, one per line, to the output sink.
    pub fn print_names(&mut self) -> io::Result<()> {
        for binding in self.bindings.iter() {
            writeln!(self.out, "{}", binding.name)?;
        }
        self.out.flush()
    }
}

impl Default for Env {
    fn default() -> Self {
        Env::new()
    }
}

impl fmt::Debug for Env {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Env")
            .field("names", &self.names().collect::<Vec<_>>())
            .field("running", &self.running)
            .finish()
    }
}
