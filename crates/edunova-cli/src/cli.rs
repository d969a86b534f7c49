use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "edunova", version, about = "Learning roadmaps, quizzes and chat from the terminal")]
pub(crate) struct Cli {
    /// Client configuration file (TOML).
    #[arg(long, short = 'c', global = true, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub(crate) verbose: bool,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Fetch the roadmap from the backend and list its nodes.
    Roadmap {
        /// Also write the roadmap JSON to this file.
        #[arg(long, value_name = "FILE")]
        save: Option<PathBuf>,
    },

    /// Fetch and cache the quiz of every node of a roadmap.
    Prefetch(RoadmapArg),

    /// Show the quiz of one node.
    Quiz {
        #[command(flatten)]
        roadmap: RoadmapArg,

        /// Node to open.
        #[arg(long)]
        node: i64,

        /// Comma separated option indices to submit, one per question.
        #[arg(long, value_delimiter = ',')]
        answers: Vec<usize>,
    },

    /// Render markup from a file, or stdin when omitted.
    Render {
        /// Input file.
        file: Option<PathBuf>,
    },

    /// Ask the backend a question and render the answer.
    Chat {
        /// Question text.
        query: String,

        /// Roadmap file holding the node to scope the question to.
        #[arg(long, value_name = "FILE", requires = "node")]
        roadmap: Option<PathBuf>,

        /// Node to scope the question to.
        #[arg(long, requires = "roadmap")]
        node: Option<i64>,
    },
}

#[derive(Args, Debug)]
pub(crate) struct RoadmapArg {
    /// Roadmap JSON file, as written by `roadmap --save`.
    #[arg(long, value_name = "FILE")]
    pub(crate) roadmap: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_quiz_answers() {
        let cli = Cli::parse_from([
            "edunova", "quiz", "--roadmap", "r.json", "--node", "3", "--answers", "0,2,1",
        ]);
        match cli.command {
            Command::Quiz { node, answers, .. } => {
                assert_eq!(node, 3);
                assert_eq!(answers, vec![0, 2, 1]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn chat_node_requires_roadmap() {
        let result = Cli::try_parse_from(["edunova", "chat", "hi", "--node", "1"]);
        assert!(result.is_err());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["edunova", "render", "-v", "--config", "c.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
    }
}
