//! Transfer function of primitive statements

use super::depend_set::DependSet;
use super::dependencies::Dependencies;
use crate::ast::Primitive;

impl Primitive {
    /// Dependency state after executing this statement in state `input`.
    ///
    /// `input` is never modified and the result shares nothing with it.
    /// Assigning `x := f(a, b)` maps `x` to the union of the current sets of
    /// `a` and `b` (not to `{a, b}`); a variable with no entry contributes
    /// nothing, and a constant right-hand side leaves `x` with an empty set.
    pub fn calculate_dependencies(&self, input: &Dependencies) -> Dependencies {
        let mut out = input.copy();
        if let Primitive::Assignment { variable, expression } = self {
            let mut deps = DependSet::new();
            for used in expression.iter() {
                if let Some(set) = input.get(used) {
                    deps.merge(set);
                }
            }
            out.put(variable.as_str(), deps);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(vars: &[&str]) -> DependSet {
        vars.iter().copied().collect()
    }

    #[test]
    fn test_null_and_error_copy_input() {
        let mut input = Dependencies::new();
        input.put("x", set(&["a"]));

        assert_eq!(Primitive::Null.calculate_dependencies(&input), input);
        assert_eq!(Primitive::Error.calculate_dependencies(&input), input);
    }

    #[test]
    fn test_assign_unknown_variable_gives_empty_set() {
        let stmt = Primitive::assignment("x", set(&["y"]));
        let out = stmt.calculate_dependencies(&Dependencies::new());

        assert_eq!(out.get("x"), Some(&DependSet::new()));
        assert!(!out.contains_key("y"));
    }

    #[test]
    fn test_assign_is_transitive() {
        let mut input = Dependencies::new();
        input.put("a", DependSet::new()).put("b", set(&["a"]));

        let out = Primitive::assignment("c", set(&["b"])).calculate_dependencies(&input);

        assert_eq!(out.get("c"), Some(&set(&["a"])));
        assert_eq!(out.get("b"), Some(&set(&["a"])));
    }

    #[test]
    fn test_assign_unions_every_operand() {
        let mut input = Dependencies::new();
        input.put("a", set(&["p"])).put("b", set(&["q", "r"]));

        let out = Primitive::assignment("x", set(&["a", "b", "unknown"])).calculate_dependencies(&input);

        assert_eq!(out.get("x"), Some(&set(&["p", "q", "r"])));
    }

    #[test]
    fn test_assign_constant_overwrites() {
        let mut input = Dependencies::new();
        input.put("x", set(&["p"]));

        let out = Primitive::assignment("x", DependSet::new()).calculate_dependencies(&input);

        assert_eq!(out.get("x"), Some(&DependSet::new()));
        // input keeps its own set
        assert_eq!(input.get("x"), Some(&set(&["p"])));
    }

    #[test]
    fn test_self_assignment_reads_previous_value() {
        let mut input = Dependencies::new();
        input.put("x", set(&["p"])).put("y", set(&["q"]));

        let out = Primitive::assignment("x", set(&["x", "y"])).calculate_dependencies(&input);

        assert_eq!(out.get("x"), Some(&set(&["p", "q"])));
    }
}
