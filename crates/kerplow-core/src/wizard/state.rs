//! Wizard state threaded through the node walk

use super::Topic;
use crate::error::{KerplowError, Result};
use crate::manifest::PendingMutation;
use crate::runtime::{DependencyKind, DependencySet};
use crate::templates::{write_route_manifest, TemplateCopyJob, TemplateInstaller};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Answers captured so far in this run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<Topic, bool>);

impl Answers {
    pub fn get(&self, topic: Topic) -> Option<bool> {
        self.0.get(&topic).copied()
    }

    /// True only if the topic was asked and answered yes
    pub fn is_yes(&self, topic: Topic) -> bool {
        self.get(topic).unwrap_or(false)
    }

    /// Record an answer. Each topic can be answered once per run.
    pub fn record(&mut self, topic: Topic, answer: bool) -> Result<()> {
        if self.0.contains_key(&topic) {
            return Err(KerplowError::QuestionAskedTwice(topic));
        }
        self.0.insert(topic, answer);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Topic, bool)> + '_ {
        self.0.iter().map(|(topic, answer)| (*topic, *answer))
    }
}

/// A side effect produced by a wizard node
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Copy a template now, overwriting
    Copy(TemplateCopyJob),
    /// Copy a template now unless the destination exists
    CopyIfAbsent(TemplateCopyJob),
    /// Create an empty project directory now
    CreateDir(PathBuf),
    /// List the route modules under a project directory into a manifest file
    WriteRoutes { routes_dir: PathBuf, manifest: PathBuf },
    AddDependency(DependencyKind, &'static str),
    RemoveDependency(DependencyKind, &'static str),
    /// Queue a manifest edit for the end of the run
    Mutate(PendingMutation),
}

pub type Effects = Vec<Effect>;

/// Everything the wizard has decided so far
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WizardState {
    pub answers: Answers,
    pub dependencies: DependencySet,
    pub mutations: Vec<PendingMutation>,
    /// Template copies already performed, in order
    pub copied: Vec<TemplateCopyJob>,
}

impl WizardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply effects: file operations run immediately, dependencies and
    /// manifest edits are queued.
    pub async fn apply(mut self, effects: Effects, installer: &TemplateInstaller) -> Result<Self> {
        for effect in effects {
            match effect {
                Effect::Copy(job) => {
                    installer.copy(&job).await?;
                    self.copied.push(job);
                }
                Effect::CopyIfAbsent(job) => {
                    if installer.copy_if_absent(&job).await?.is_some() {
                        self.copied.push(job);
                    }
                }
                Effect::CreateDir(dir) => {
                    installer.create_dir(&dir).await?;
                }
                Effect::WriteRoutes {
                    routes_dir,
                    manifest,
                } => {
                    let root = installer.target_root();
                    write_route_manifest(&root.join(routes_dir), &root.join(manifest)).await?;
                }
                Effect::AddDependency(kind, name) => {
                    self.dependencies.add(kind, name);
                }
                Effect::RemoveDependency(kind, name) => {
                    self.dependencies.remove(kind, name);
                }
                Effect::Mutate(mutation) => self.mutations.push(mutation),
            }
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers_are_recorded_once() {
        let mut answers = Answers::default();
        answers.record(Topic::Express, true).unwrap();

        let err = answers.record(Topic::Express, false).unwrap_err();
        assert!(matches!(err, KerplowError::QuestionAskedTwice(Topic::Express)));
        assert_eq!(answers.get(Topic::Express), Some(true));
    }

    #[test]
    fn test_unasked_topic_is_not_yes() {
        let answers = Answers::default();
        assert_eq!(answers.get(Topic::Rollup), None);
        assert!(!answers.is_yes(Topic::Rollup));
    }

    #[tokio::test]
    async fn test_apply_copies_eagerly_and_queues_the_rest() {
        let templates = tempfile::tempdir().unwrap();
        let project = tempfile::tempdir().unwrap();
        std::fs::write(templates.path().join("tsconfig.json"), "{}").unwrap();
        let installer = TemplateInstaller::new(templates.path(), project.path());

        let state = WizardState::new()
            .apply(
                vec![
                    Effect::Copy(TemplateCopyJob::mirrored("tsconfig.json")),
                    Effect::CreateDir(PathBuf::from("public")),
                    Effect::AddDependency(DependencyKind::Dev, "typescript"),
                    Effect::AddDependency(DependencyKind::Dev, "eslint"),
                    Effect::RemoveDependency(DependencyKind::Dev, "typescript"),
                    Effect::Mutate(PendingMutation::script("start", "node index.js")),
                ],
                &installer,
            )
            .await
            .unwrap();

        assert!(project.path().join("tsconfig.json").is_file());
        assert!(project.path().join("public").is_dir());
        assert_eq!(state.copied, [TemplateCopyJob::mirrored("tsconfig.json")]);
        let dev: Vec<&str> = state.dependencies.names(DependencyKind::Dev).collect();
        assert_eq!(dev, ["eslint"]);
        assert_eq!(state.mutations.len(), 1);
        assert!(!project.path().join("package.json").exists());
    }
}
