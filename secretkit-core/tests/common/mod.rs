//! Test doubles shared across integration tests.
#![allow(dead_code, missing_docs)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use secretkit_core::store::MemorySecureStore;
use secretkit_core::{BiometricAuthenticator, BiometricReply, SecretSession};

/// What the scripted sensor does with the next challenge.
#[derive(Debug, Clone)]
pub enum Script {
    /// Resolve from a freshly spawned thread, like the platform callback.
    Succeed,
    /// Fail from a freshly spawned thread with the given reason.
    Fail(Option<String>),
    /// Keep the reply so the test resolves it by hand.
    Hold,
    /// Drop the reply without resolving it.
    Abandon,
}

pub struct ScriptedBiometrics {
    available: bool,
    script: Mutex<Script>,
    evaluations: AtomicUsize,
    held: Mutex<Vec<Arc<BiometricReply>>>,
}

impl ScriptedBiometrics {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            available: true,
            script: Mutex::new(script),
            evaluations: AtomicUsize::new(0),
            held: Mutex::new(Vec::new()),
        })
    }

    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            available: false,
            script: Mutex::new(Script::Hold),
            evaluations: AtomicUsize::new(0),
            held: Mutex::new(Vec::new()),
        })
    }

    pub fn set_script(&self, script: Script) {
        *self.script.lock().unwrap() = script;
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }

    /// Takes the reply of the oldest held challenge.
    pub fn take_held(&self) -> Option<Arc<BiometricReply>> {
        let mut held = self.held.lock().unwrap();
        if held.is_empty() {
            None
        } else {
            Some(held.remove(0))
        }
    }
}

impl BiometricAuthenticator for ScriptedBiometrics {
    fn can_evaluate(&self) -> bool {
        self.available
    }

    fn evaluate(&self, _reason: String, reply: Arc<BiometricReply>) {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        let script = self.script.lock().unwrap().clone();
        match script {
            Script::Succeed => {
                thread::spawn(move || reply.resolve(true, None).unwrap());
            }
            Script::Fail(reason) => {
                thread::spawn(move || reply.resolve(false, reason).unwrap());
            }
            Script::Hold => self.held.lock().unwrap().push(reply),
            Script::Abandon => drop(reply),
        }
    }
}

pub fn session(
    store: &Arc<MemorySecureStore>,
    biometrics: &Arc<ScriptedBiometrics>,
) -> SecretSession {
    SecretSession::new(store.clone(), biometrics.clone()).unwrap()
}
