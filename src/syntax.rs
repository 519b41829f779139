use std::fmt;

/// An individual in the domain of discourse.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    Var(String),
    Const(String),
    /// function application, always with at least one argument. A nullary
    /// application is written as a `Const`
    App(String, Vec<Term>),
}

/// A proposition of propositional or first-order logic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Formula {
    /// propositional atom when the argument list is empty, predicate
    /// application otherwise
    Atom(String, Vec<Term>),
    Bottom,
    Not(Box<Formula>),
    And(Box<Formula>, Box<Formula>),
    Or(Box<Formula>, Box<Formula>),
    Implies(Box<Formula>, Box<Formula>),
    Forall(String, Box<Formula>),
    Exists(String, Box<Formula>),
}

impl Term {
    pub fn var(name: &str) -> Term {
        Term::Var(name.to_string())
    }

    pub fn constant(name: &str) -> Term {
        Term::Const(name.to_string())
    }

    pub fn app(name: &str, args: Vec<Term>) -> Term {
        Term::App(name.to_string(), args)
    }

    /// A term without variables.
    pub fn is_ground(&self) -> bool {
        match self {
            Term::Var(_) => false,
            Term::Const(_) => true,
            Term::App(_, args) => args.iter().all(Term::is_ground),
        }
    }
}

impl Formula {
    pub fn atom(name: &str, args: Vec<Term>) -> Formula {
        Formula::Atom(name.to_string(), args)
    }

    pub fn not(operand: Formula) -> Formula {
        Formula::Not(Box::new(operand))
    }

    pub fn and(left: Formula, right: Formula) -> Formula {
        Formula::And(Box::new(left), Box::new(right))
    }

    pub fn or(left: Formula, right: Formula) -> Formula {
        Formula::Or(Box::new(left), Box::new(right))
    }

    pub fn implies(antecedent: Formula, consequent: Formula) -> Formula {
        Formula::Implies(Box::new(antecedent), Box::new(consequent))
    }

    pub fn forall(bound: &str, body: Formula) -> Formula {
        Formula::Forall(bound.to_string(), Box::new(body))
    }

    pub fn exists(bound: &str, body: Formula) -> Formula {
        Formula::Exists(bound.to_string(), Box::new(body))
    }

    pub fn is_atomic(&self) -> bool {
        match self {
            Formula::Atom(_, _) | Formula::Bottom => true,
            _ => false,
        }
    }

    /// Name of the outermost connective, as shown to users.
    pub fn kind(&self) -> &'static str {
        match *self {
            Formula::Atom(_, ref args) if args.is_empty() => "atom",
            Formula::Atom(_, _) => "predicate",
            Formula::Bottom => "bottom",
            Formula::Not(_) => "negation",
            Formula::And(_, _) => "conjunction",
            Formula::Or(_, _) => "disjunction",
            Formula::Implies(_, _) => "implication",
            Formula::Forall(_, _) => "universal",
            Formula::Exists(_, _) => "existential",
        }
    }

    /// Immediate subformulas, left to right.
    pub fn children(&self) -> Vec<&Formula> {
        match *self {
            Formula::Atom(_, _) | Formula::Bottom => vec![],
            Formula::Not(ref f)
            | Formula::Forall(_, ref f)
            | Formula::Exists(_, ref f) => vec![&**f],
            Formula::And(ref l, ref r)
            | Formula::Or(ref l, ref r)
            | Formula::Implies(ref l, ref r) => vec![&**l, &**r],
        }
    }

    fn is_binary(&self) -> bool {
        match self {
            Formula::And(_, _) | Formula::Or(_, _) | Formula::Implies(_, _) => {
                true
            }
            _ => false,
        }
    }

    /// True when the rendering ends in a quantifier whose body would swallow
    /// anything printed after it.
    fn is_open_right(&self) -> bool {
        match *self {
            Formula::Forall(_, _) | Formula::Exists(_, _) => true,
            Formula::Not(ref f) => f.is_open_right(),
            _ => false,
        }
    }

    fn fmt_operand(&self, f: &mut fmt::Formatter, left: bool) -> fmt::Result {
        if self.is_binary() || (left && self.is_open_right()) {
            write!(f, "({})", self)
        } else {
            write!(f, "{}", self)
        }
    }

    fn fmt_binary(
        f: &mut fmt::Formatter,
        left: &Formula,
        op: &str,
        right: &Formula,
    ) -> fmt::Result {
        left.fmt_operand(f, true)?;
        write!(f, " {} ", op)?;
        right.fmt_operand(f, false)
    }
}

fn fmt_args(f: &mut fmt::Formatter, args: &[Term]) -> fmt::Result {
    write!(
        f,
        "({})",
        args.iter()
            .map(|t| t.to_string())
            .collect::<Vec<String>>()
            .join(", ")
    )
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Term::Var(ref s) | Term::Const(ref s) => write!(f, "{}", s),
            Term::App(ref name, ref args) => {
                write!(f, "{}", name)?;
                fmt_args(f, args)
            }
        }
    }
}

/// Canonical rendering: `¬ ∧ ∨ → ⊥ ∀ ∃`, binary connectives parenthesized
/// below the top level. Re-parsing the output yields an equal tree.
impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Formula::Atom(ref name, ref args) => {
                write!(f, "{}", name)?;
                if args.is_empty() {
                    Ok(())
                } else {
                    fmt_args(f, args)
                }
            }
            Formula::Bottom => write!(f, "⊥"),
            Formula::Not(ref op) => {
                write!(f, "¬")?;
                op.fmt_operand(f, false)
            }
            Formula::And(ref l, ref r) => Formula::fmt_binary(f, l, "∧", r),
            Formula::Or(ref l, ref r) => Formula::fmt_binary(f, l, "∨", r),
            Formula::Implies(ref l, ref r) => {
                Formula::fmt_binary(f, l, "→", r)
            }
            Formula::Forall(ref x, ref body) => {
                write!(f, "∀{}.", x)?;
                body.fmt_operand(f, false)
            }
            Formula::Exists(ref x, ref body) => {
                write!(f, "∃{}.", x)?;
                body.fmt_operand(f, false)
            }
        }
    }
}
