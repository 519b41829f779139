use crate::errors::SubstitutionError;
use crate::free::FreeVars;
use crate::syntax::{Formula, Term};
use std::collections::BTreeSet;
use tracing::debug;

pub trait Substitutable: Sized {
    /// Replace free occurrences of `varname` by `term`, renaming bound
    /// variables where `term` would otherwise be captured. Returns a new tree.
    fn applysubst(&self, varname: &str, term: &Term) -> Self;
}

impl Substitutable for Term {
    fn applysubst(&self, varname: &str, term: &Term) -> Term {
        match *self {
            Term::Var(ref s) => {
                if s == varname {
                    term.clone()
                } else {
                    self.clone()
                }
            }
            Term::Const(_) => self.clone(),
            Term::App(ref name, ref args) => Term::App(
                name.clone(),
                args.iter().map(|a| a.applysubst(varname, term)).collect(),
            ),
        }
    }
}

impl Substitutable for Formula {
    fn applysubst(&self, varname: &str, term: &Term) -> Formula {
        use self::Formula::*;
        match *self {
            Atom(ref name, ref args) => Atom(
                name.clone(),
                args.iter().map(|a| a.applysubst(varname, term)).collect(),
            ),
            Bottom => Bottom,
            Not(ref f) => Not(Box::new(f.applysubst(varname, term))),
            And(ref l, ref r) => And(
                Box::new(l.applysubst(varname, term)),
                Box::new(r.applysubst(varname, term)),
            ),
            Or(ref l, ref r) => Or(
                Box::new(l.applysubst(varname, term)),
                Box::new(r.applysubst(varname, term)),
            ),
            Implies(ref l, ref r) => Implies(
                Box::new(l.applysubst(varname, term)),
                Box::new(r.applysubst(varname, term)),
            ),
            Forall(ref x, ref body) => {
                let (x, body) = subst_binder(x, body, varname, term);
                Forall(x, Box::new(body))
            }
            Exists(ref x, ref body) => {
                let (x, body) = subst_binder(x, body, varname, term);
                Exists(x, Box::new(body))
            }
        }
    }
}

/// Substitution under a quantifier binding `bound`.
fn subst_binder(
    bound: &str,
    body: &Formula,
    varname: &str,
    term: &Term,
) -> (String, Formula) {
    if bound == varname {
        return (bound.to_string(), body.clone());
    }
    let term_vars = term.free_vars();
    if !term_vars.contains(bound) {
        return (bound.to_string(), body.applysubst(varname, term));
    }

    let mut avoid = body.free_vars();
    avoid.extend(term_vars);
    avoid.insert(varname.to_string());
    let fresh = fresh_name(bound, &avoid);
    debug!(bound, fresh = %fresh, "renaming bound variable to avoid capture");

    let renamed = body.applysubst(bound, &Term::Var(fresh.clone()));
    let body = renamed.applysubst(varname, term);
    (fresh, body)
}

/// First of `stem1`, `stem2`, ... not in `avoid`, where `stem` is `base`
/// without its trailing digits.
pub fn fresh_name(base: &str, avoid: &BTreeSet<String>) -> String {
    let stem = match base.trim_end_matches(|c: char| c.is_ascii_digit()) {
        "" => base,
        stem => stem,
    };
    let mut n = 1;
    loop {
        let name = format!("{}{}", stem, n);
        if !avoid.contains(&name) {
            return name;
        }
        n += 1;
    }
}

fn check_term(term: &Term) -> Result<(), SubstitutionError> {
    match *term {
        Term::Var(ref s) | Term::Const(ref s) if s.is_empty() => {
            Err(SubstitutionError::EmptyName)
        }
        Term::Var(_) | Term::Const(_) => Ok(()),
        Term::App(ref name, _) if name.is_empty() => {
            Err(SubstitutionError::EmptyName)
        }
        Term::App(ref name, ref args) if args.is_empty() => {
            Err(SubstitutionError::EmptyApplication(name.clone()))
        }
        Term::App(_, ref args) => args.iter().try_for_each(check_term),
    }
}

/// Capture-avoiding substitution of `term` for the variable `varname`.
///
/// Fails only for a malformed `term` (an application with no arguments or an
/// empty symbol name), which the parser never produces.
pub fn substitute<T: Substitutable>(
    node: &T,
    varname: &str,
    term: &Term,
) -> Result<T, SubstitutionError> {
    if varname.is_empty() {
        return Err(SubstitutionError::EmptyName);
    }
    check_term(term)?;
    Ok(node.applysubst(varname, term))
}

/// Whether `term` can be substituted for `varname` in `formula` without any
/// of its variables being captured, i.e. without renaming.
pub fn is_free_for(formula: &Formula, term: &Term, varname: &str) -> bool {
    use self::Formula::*;
    match *formula {
        Atom(_, _) | Bottom => true,
        Not(ref f) => is_free_for(f, term, varname),
        And(ref l, ref r) | Or(ref l, ref r) | Implies(ref l, ref r) => {
            is_free_for(l, term, varname) && is_free_for(r, term, varname)
        }
        Forall(ref x, ref body) | Exists(ref x, ref body) => {
            if x == varname || !body.occurs_free(varname) {
                true
            } else if term.occurs_free(x) {
                false
            } else {
                is_free_for(body, term, varname)
            }
        }
    }
}

/// Equality up to consistent renaming of bound variables.
pub fn alpha_eq(a: &Formula, b: &Formula) -> bool {
    use self::Formula::*;
    match (a, b) {
        (&Atom(ref p, ref xs), &Atom(ref q, ref ys)) => p == q && xs == ys,
        (&Bottom, &Bottom) => true,
        (&Not(ref f), &Not(ref g)) => alpha_eq(f, g),
        (&And(ref l1, ref r1), &And(ref l2, ref r2))
        | (&Or(ref l1, ref r1), &Or(ref l2, ref r2))
        | (&Implies(ref l1, ref r1), &Implies(ref l2, ref r2)) => {
            alpha_eq(l1, l2) && alpha_eq(r1, r2)
        }
        (&Forall(ref x, ref f), &Forall(ref y, ref g))
        | (&Exists(ref x, ref f), &Exists(ref y, ref g)) => {
            if x == y {
                return alpha_eq(f, g);
            }
            let mut avoid = f.free_vars();
            avoid.extend(g.free_vars());
            avoid.insert(x.clone());
            avoid.insert(y.clone());
            let z = Term::Var(fresh_name(x, &avoid));
            alpha_eq(&f.applysubst(x, &z), &g.applysubst(y, &z))
        }
        _ => false,
    }
}
