use crate::syntax::{Formula, Term};
use std::collections::BTreeSet;

pub trait FreeVars {
    /// Collect the names of variables not bound by an enclosing quantifier.
    fn collect_free(&self, out: &mut BTreeSet<String>);

    fn free_vars(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.collect_free(&mut out);
        out
    }

    fn occurs_free(&self, name: &str) -> bool {
        self.free_vars().contains(name)
    }
}

impl FreeVars for Term {
    fn collect_free(&self, out: &mut BTreeSet<String>) {
        match *self {
            Term::Var(ref s) => {
                out.insert(s.clone());
            }
            Term::Const(_) => (),
            Term::App(_, ref args) => {
                for arg in args {
                    arg.collect_free(out);
                }
            }
        }
    }
}

impl FreeVars for Formula {
    fn collect_free(&self, out: &mut BTreeSet<String>) {
        match *self {
            Formula::Atom(_, ref args) => {
                for arg in args {
                    arg.collect_free(out);
                }
            }
            Formula::Bottom => (),
            Formula::Not(ref f) => f.collect_free(out),
            Formula::And(ref l, ref r)
            | Formula::Or(ref l, ref r)
            | Formula::Implies(ref l, ref r) => {
                l.collect_free(out);
                r.collect_free(out);
            }
            Formula::Forall(ref x, ref body)
            | Formula::Exists(ref x, ref body) => {
                let mut inner = body.free_vars();
                inner.remove(x);
                out.extend(inner);
            }
        }
    }
}

impl Term {
    /// Every variable of the term. Terms have no binders, so these are
    /// exactly its free variables.
    pub fn variables(&self) -> BTreeSet<String> {
        self.free_vars()
    }
}

impl Formula {
    /// A formula without free variables.
    pub fn is_sentence(&self) -> bool {
        self.free_vars().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn free(text: &str) -> BTreeSet<String> {
        parse(text).unwrap().free_vars()
    }

    #[test]
    fn atoms() {
        assert_eq!(free("P(x)"), set(&["x"]));
        assert_eq!(free("P(x) & Q(y)"), set(&["x", "y"]));
        assert_eq!(free("P(f(x, C), g(z))"), set(&["x", "z"]));
        assert_eq!(free("p -> ⊥"), set(&[]));
    }

    #[test]
    fn quantifiers_bind() {
        assert_eq!(free("forall x. P(x, y)"), set(&["y"]));
        assert_eq!(free("forall x. exists y. R(x,y)"), set(&[]));
        assert_eq!(free("∀x. (P(x) → Q(y))"), set(&["y"]));
        assert_eq!(free("(∀x. P(x)) → Q(x)"), set(&["x"]));
        assert_eq!(free("∃x. ∀y. R(x, y, z)"), set(&["z"]));
    }

    #[test]
    fn shadowing() {
        assert_eq!(free("forall x. (P(x) & exists x. Q(x))"), set(&[]));
        assert_eq!(free("P(x) & forall x. Q(x)"), set(&["x"]));
    }

    #[test]
    fn sentences_and_terms() {
        assert!(parse("forall x. P(x)").unwrap().is_sentence());
        assert!(!parse("P(x)").unwrap().is_sentence());
        assert_eq!(
            Term::app("f", vec![Term::var("x"), Term::var("x")]).variables(),
            set(&["x"])
        );
        assert!(Term::constant("C").variables().is_empty());
    }
}
