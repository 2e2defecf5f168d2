//! Command runner test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use gav_checker::process::{CommandRunner, ProcessError, ScriptResult};

/// Command runner answering from a script instead of spawning processes
///
/// `gh` calls are answered by the first argument that has a registered reply.
/// `mvn` calls write the registered listing to the `-DoutputFile=` path.
#[derive(Default)]
pub struct ScriptedRunner {
    gh_replies: HashMap<String, ScriptResult>,
    mvn_listing: Option<String>,
    mvn_status: i32,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

#[allow(dead_code)]
impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply to `gh` invocations whose arguments contain `url` and `field`
    pub fn with_pr_field(mut self, url: &str, field: &str, output: &str) -> Self {
        self.gh_replies.insert(
            format!("{} {}", url, field),
            ScriptResult::new(
                "gh",
                0,
                output.lines().map(str::to_string).collect(),
                vec![],
            ),
        );
        self
    }

    /// Make the dependency listing write `listing` and exit with `status`
    pub fn with_mvn_listing(mut self, listing: &str, status: i32) -> Self {
        self.mvn_listing = Some(listing.to_string());
        self.mvn_status = status;
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    fn reply_gh(&self, args: &[String]) -> ScriptResult {
        let url = args.get(2).cloned().unwrap_or_default();
        let field = args.get(4).cloned().unwrap_or_default();
        self.gh_replies
            .get(&format!("{} {}", url, field))
            .cloned()
            .unwrap_or_else(|| {
                ScriptResult::new("gh", 1, vec![], vec!["no such pull request".to_string()])
            })
    }

    fn reply_mvn(&self, args: &[String]) -> ScriptResult {
        if let Some(listing) = &self.mvn_listing
            && let Some(output) = args.iter().find_map(|arg| arg.strip_prefix("-DoutputFile="))
        {
            std::fs::write(output, listing).unwrap();
        }
        ScriptResult::new("mvn", self.mvn_status, vec![], vec![])
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    fn ensure_available(&self, program: &str) -> Result<(), ProcessError> {
        match program {
            "gh" => Ok(()),
            "mvn" if self.mvn_listing.is_some() => Ok(()),
            other => Err(ProcessError::Unavailable(other.to_string())),
        }
    }

    async fn run(&self, program: &str, args: &[String]) -> Result<ScriptResult, ProcessError> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        match program {
            "gh" => Ok(self.reply_gh(args)),
            "mvn" => Ok(self.reply_mvn(args)),
            other => Err(ProcessError::Unavailable(other.to_string())),
        }
    }
}
