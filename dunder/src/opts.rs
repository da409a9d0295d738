use clap::{ArgAction, Parser, Subcommand};
use dunder_core::CompareOp;

#[derive(Debug, Parser)]
#[command(name = "dunder", version)]
#[command(about = "Poke at attribute resolution and rich comparison")]
pub struct Opts {
    /// Raise the log level, repeat for more (overrides RUST_LOG).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compare two byte strings through a comparison call site.
    Cmp {
        /// The operator, e.g. `lt`, `<=` or `__ge__`.
        #[arg(long, default_value = "lt")]
        op: CompareOp,

        /// Print the three-way ordering (-1, 0 or 1) instead.
        #[arg(long)]
        ordering: bool,

        left: String,

        right: String,
    },

    /// Resolve an attribute on an instance of the demo class hierarchy.
    Lookup {
        /// The attribute name, e.g. `size`, `greet`, `label` or `kind`.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cmp_defaults_to_lt() {
        let opts = Opts::try_parse_from(["dunder", "cmp", "ab", "abc"]).unwrap();

        match opts.command {
            Command::Cmp {
                op,
                ordering,
                left,
                right,
            } => {
                assert_eq!(op, CompareOp::Lt);
                assert!(!ordering);
                assert_eq!((left.as_str(), right.as_str()), ("ab", "abc"));
            }

            other => panic!("expected cmp, got {:?}", other),
        }
    }

    #[test]
    fn operator_tokens() {
        for (token, op) in [(">=", CompareOp::Ge), ("ne", CompareOp::Ne), ("__eq__", CompareOp::Eq)] {
            let opts = Opts::try_parse_from(["dunder", "-vv", "cmp", "--op", token, "a", "b"]).unwrap();

            assert_eq!(opts.verbose, 2);
            assert!(matches!(opts.command, Command::Cmp { op: parsed, .. } if parsed == op));
        }

        assert!(Opts::try_parse_from(["dunder", "cmp", "--op", "<>", "a", "b"]).is_err());
    }
}
