//! Scripted collaborators that record what the orchestrator asks of them.

use std::io;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::{
    Collaborators, ConfirmationGate, GateError, InputReader, Installer, LifecycleDecision,
    LifecycleError, LifecycleOrchestrator, Notifier, RunReport, ServiceError, Uninstaller,
    WaitSpec,
};

/// Something a collaborator was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Event {
    Decide,
    Install,
    Present(String),
    Uninstall,
    Acknowledge,
}

/// Shared, ordered record of collaborator calls.
#[derive(Debug, Clone, Default)]
pub(crate) struct EventLog {
    events: Arc<Mutex<Vec<Event>>>,
}

impl EventLog {
    fn push(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn messages(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Present(message) => Some(message),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, wanted: &Event) -> usize {
        self.events().iter().filter(|event| *event == wanted).count()
    }

    pub(crate) fn position(&self, wanted: &Event) -> Option<usize> {
        self.events().iter().position(|event| event == wanted)
    }
}

pub(crate) fn rejected(message: &str) -> ServiceError {
    ServiceError::Rejected {
        message: message.to_owned(),
    }
}

/// Gate that replays a fixed answer, or fails when given none.
pub(crate) struct ScriptedGate {
    pub(crate) answer: Option<LifecycleDecision>,
    pub(crate) log: EventLog,
}

impl ConfirmationGate for ScriptedGate {
    fn decide(&mut self) -> Result<LifecycleDecision, GateError> {
        self.log.push(Event::Decide);
        self.answer
            .ok_or_else(|| GateError::Read(io::Error::other("console detached")))
    }
}

pub(crate) struct ScriptedInstaller {
    pub(crate) response: Result<bool, ServiceError>,
    pub(crate) log: EventLog,
}

impl Installer for ScriptedInstaller {
    fn install(&self) -> Result<bool, ServiceError> {
        self.log.push(Event::Install);
        self.response.clone()
    }
}

pub(crate) struct ScriptedUninstaller {
    pub(crate) response: Result<bool, ServiceError>,
    pub(crate) log: EventLog,
}

#[async_trait]
impl Uninstaller for ScriptedUninstaller {
    async fn uninstall(&self) -> Result<bool, ServiceError> {
        self.log.push(Event::Uninstall);
        tokio::task::yield_now().await;
        self.response.clone()
    }
}

pub(crate) struct RecordingNotifier {
    pub(crate) log: EventLog,
}

impl Notifier for RecordingNotifier {
    fn present(&self, message: &str) {
        self.log.push(Event::Present(message.to_owned()));
    }
}

pub(crate) struct RecordingInput {
    pub(crate) log: EventLog,
}

impl InputReader for RecordingInput {
    fn acknowledge(&mut self) -> io::Result<()> {
        self.log.push(Event::Acknowledge);
        Ok(())
    }
}

/// Collaborator responses for one run.
pub(crate) struct Script {
    pub(crate) answer: Option<LifecycleDecision>,
    pub(crate) install: Result<bool, ServiceError>,
    pub(crate) uninstall: Result<bool, ServiceError>,
    pub(crate) wait: WaitSpec,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            answer: Some(LifecycleDecision::Proceed),
            install: Ok(true),
            uninstall: Ok(true),
            wait: WaitSpec::default(),
        }
    }
}

impl Script {
    /// Runs the orchestrator to completion on a paused current-thread runtime.
    pub(crate) fn run(&self) -> (Result<RunReport, LifecycleError>, EventLog) {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .start_paused(true)
            .build()
            .expect("test runtime");
        runtime.block_on(self.run_async())
    }

    pub(crate) async fn run_async(&self) -> (Result<RunReport, LifecycleError>, EventLog) {
        let log = EventLog::default();
        let mut gate = ScriptedGate {
            answer: self.answer,
            log: log.clone(),
        };
        let installer = ScriptedInstaller {
            response: self.install.clone(),
            log: log.clone(),
        };
        let uninstaller = ScriptedUninstaller {
            response: self.uninstall.clone(),
            log: log.clone(),
        };
        let notifier = RecordingNotifier { log: log.clone() };
        let mut input = RecordingInput { log: log.clone() };
        let mut orchestrator = LifecycleOrchestrator::new(
            Collaborators {
                gate: &mut gate,
                installer: &installer,
                uninstaller: &uninstaller,
                notifier: &notifier,
                input: &mut input,
            },
            self.wait,
        );
        let result = orchestrator.run().await;
        (result, log)
    }
}
