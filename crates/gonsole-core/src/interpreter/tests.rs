use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use super::*;
use crate::console::{CharacterEncoding, ConsoleOutput, SharedBuffer};
use crate::error::ConsoleError;
use crate::pipeline::{CommandLineParser, GitTool};
use crate::repository::{CompositeRepositoryProvider, RepositoryProvider};
use crate::splitter::split;

/// Interpreter claiming a fixed set of verbs and recording what it ran
struct Recording {
    name: &'static str,
    verbs: Vec<&'static str>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl Recording {
    fn boxed(
        name: &'static str,
        verbs: &[&'static str],
        seen: &Arc<Mutex<Vec<String>>>,
    ) -> Box<dyn ConsoleCommandInterpreter> {
        Box::new(Self {
            name,
            verbs: verbs.to_vec(),
            seen: Arc::clone(seen),
        })
    }
}

#[async_trait]
impl ConsoleCommandInterpreter for Recording {
    fn name(&self) -> &str {
        self.name
    }

    fn is_recognized(&self, command_line: &CommandLine) -> bool {
        command_line
            .command()
            .is_some_and(|verb| self.verbs.iter().any(|known| *known == verb))
    }

    async fn execute(&self, command_line: &CommandLine) -> ConsoleResult<Option<String>> {
        self.seen
            .lock()
            .push(format!("{}:{}", self.name, command_line));
        Ok(None)
    }
}

fn channel() -> (ConsoleOutput, SharedBuffer) {
    let buffer = SharedBuffer::new();
    let output = ConsoleOutput::new(Box::new(buffer.writer()), CharacterEncoding::Utf8, "\n");
    (output, buffer)
}

fn repositories() -> Arc<CompositeRepositoryProvider> {
    Arc::new(
        CompositeRepositoryProvider::new(vec![
            PathBuf::from("/work/alpha/.git"),
            PathBuf::from("/work/beta"),
        ])
        .unwrap(),
    )
}

#[tokio::test]
async fn test_first_recognizing_interpreter_wins() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let chain = InterpreterChain::new(vec![
        Recording::boxed("first", &["status"], &seen),
        Recording::boxed("second", &["status", "log"], &seen),
    ]);

    let status = split("status -s").unwrap();
    chain.find(&status).unwrap().execute(&status).await.unwrap();
    let log = split("log").unwrap();
    chain.find(&log).unwrap().execute(&log).await.unwrap();

    assert_eq!(*seen.lock(), vec!["first:status -s", "second:log"]);
}

#[test]
fn test_no_interpreter_recognizes_unknown_verb() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let chain = InterpreterChain::new(vec![Recording::boxed("only", &["status"], &seen)]);

    assert!(chain.find(&split("frobnicate").unwrap()).is_none());
    assert!(chain.find(&CommandLine::default()).is_none());
}

#[test]
fn test_chain_debug_lists_names_in_order() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let chain = InterpreterChain::new(vec![
        Recording::boxed("control", &[], &seen),
        Recording::boxed("git", &[], &seen),
    ]);
    assert_eq!(format!("{:?}", chain), r#"["control", "git"]"#);
    assert_eq!(chain.len(), 2);
}

#[test]
fn test_control_command_names() {
    assert_eq!("use".parse::<ControlCommand>().unwrap(), ControlCommand::Use);
    assert_eq!("repos".parse::<ControlCommand>().unwrap(), ControlCommand::Repos);
    assert_eq!(
        "status".parse::<ControlCommand>(),
        Err(ConsoleError::UnrecognizedCommand("status".to_string()))
    );
}

#[tokio::test]
async fn test_use_switches_repository_by_name() {
    let repositories = repositories();
    let (output, _) = channel();
    let control = ControlCommandInterpreter::new(output, repositories.clone());

    let reply = control.execute(&split("use beta").unwrap()).await.unwrap();

    assert_eq!(reply, None);
    assert_eq!(
        repositories.current_repository_location(),
        PathBuf::from("/work/beta")
    );
}

#[tokio::test]
async fn test_use_reports_unknown_repository() {
    let repositories = repositories();
    let (output, _) = channel();
    let control = ControlCommandInterpreter::new(output, repositories.clone());

    let reply = control.execute(&split("use gamma").unwrap()).await.unwrap();

    assert_eq!(reply.as_deref(), Some("Unknown repository: gamma"));
    assert_eq!(
        repositories.current_repository_location(),
        PathBuf::from("/work/alpha/.git")
    );
}

#[tokio::test]
async fn test_use_without_argument_prints_usage() {
    let (output, _) = channel();
    let control = ControlCommandInterpreter::new(output, repositories());

    let reply = control.execute(&split("use").unwrap()).await.unwrap();

    assert_eq!(reply.as_deref(), Some("Usage: use <repository>"));
}

#[tokio::test]
async fn test_repos_marks_current_repository() {
    let (output, buffer) = channel();
    let control = ControlCommandInterpreter::new(output, repositories());

    let reply = control.execute(&split("repos").unwrap()).await.unwrap();

    assert_eq!(reply, None);
    assert_eq!(
        buffer.contents(),
        "* alpha (/work/alpha/.git)\n  beta (/work/beta)\n"
    );
}

#[test]
fn test_git_interpreter_recognizes_only_known_subcommands() {
    let (output, _) = channel();
    let (errors, _) = channel();
    let git = GitCommandInterpreter::new(GitTool::default(), output, errors, repositories());

    assert!(git.is_recognized(&split("status").unwrap()));
    assert!(git.is_recognized(&split("commit -m 'wip'").unwrap()));
    assert!(!git.is_recognized(&split("use beta").unwrap()));
    assert!(!git.is_recognized(&split("frobnicate").unwrap()));
    assert!(!git.is_recognized(&CommandLine::default()));
}

#[tokio::test]
async fn test_git_failure_becomes_error_message() {
    let (output, _) = channel();
    let (errors, _) = channel();
    let tool = GitTool::new("/nonexistent/gonsole-git", Default::default());
    let git = GitCommandInterpreter::new(tool, output, errors, repositories())
        .with_parser(CommandLineParser::with_subcommands(["status"]));

    let reply = git.execute(&split("status").unwrap()).await.unwrap();

    let message = reply.expect("failure should be reported");
    assert!(message.starts_with("Tool not found: /nonexistent/gonsole-git"));
}

#[tokio::test]
async fn test_control_shadows_git_on_shared_verb() {
    let (output, _) = channel();
    let (errors, _) = channel();
    let repositories = repositories();
    let git = GitCommandInterpreter::new(
        GitTool::new("/nonexistent/gonsole-git", Default::default()),
        output.clone(),
        errors,
        repositories.clone(),
    )
    .with_parser(CommandLineParser::with_subcommands(["use", "status"]));
    let interpreters: Vec<Box<dyn ConsoleCommandInterpreter>> = vec![
        Box::new(ControlCommandInterpreter::new(output, repositories)),
        Box::new(git),
    ];
    let chain = InterpreterChain::new(interpreters);

    assert_eq!(chain.find(&split("use beta").unwrap()).unwrap().name(), "control");
    assert_eq!(chain.find(&split("status").unwrap()).unwrap().name(), "git");
}
