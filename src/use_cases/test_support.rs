use std::collections::VecDeque;
use std::io::{self, Cursor, Read};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::domain::{ClientError, Request, Transport, TransportResponse};

// Observes whether a wrapped reader has been dropped.
#[derive(Clone, Default)]
pub(crate) struct DropFlag(Arc<AtomicBool>);

impl DropFlag {
    pub(crate) fn wrap<R: Read>(inner: R) -> (DropFlag, Tracked<R>) {
        let flag = DropFlag::default();
        let tracked = Tracked {
            inner,
            flag: flag.clone(),
        };
        (flag, tracked)
    }

    pub(crate) fn is_dropped(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub(crate) struct Tracked<R> {
    inner: R,
    flag: DropFlag,
}

impl<R: Read> Read for Tracked<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R> Drop for Tracked<R> {
    fn drop(&mut self) {
        self.flag.0.store(true, Ordering::SeqCst);
    }
}

// Hands out at most `step` bytes per read to exercise chunk boundaries.
pub(crate) struct TrickleReader {
    data: Cursor<Vec<u8>>,
    step: usize,
}

impl TrickleReader {
    pub(crate) fn new(data: Vec<u8>, step: usize) -> Self {
        Self {
            data: Cursor::new(data),
            step: step.max(1),
        }
    }
}

impl Read for TrickleReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let limit = buf.len().min(self.step);
        self.data.read(&mut buf[..limit])
    }
}

enum FailMode {
    // Serve the data, then fail instead of reporting end-of-stream.
    AfterData,
    // Fail once with `Interrupted`, then serve the data normally.
    InterruptedOnce { fired: bool },
}

pub(crate) struct FailingReader {
    data: Cursor<Vec<u8>>,
    mode: FailMode,
}

impl FailingReader {
    pub(crate) fn after(data: Vec<u8>) -> Self {
        Self {
            data: Cursor::new(data),
            mode: FailMode::AfterData,
        }
    }

    pub(crate) fn interrupted_once(data: Vec<u8>) -> Self {
        Self {
            data: Cursor::new(data),
            mode: FailMode::InterruptedOnce { fired: false },
        }
    }
}

impl Read for FailingReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.mode {
            FailMode::AfterData => {
                let len = self.data.read(buf)?;
                if len == 0 {
                    return Err(io::Error::new(
                        io::ErrorKind::ConnectionReset,
                        "connection reset by peer",
                    ));
                }
                Ok(len)
            }
            FailMode::InterruptedOnce { fired } => {
                if !*fired {
                    *fired = true;
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                self.data.read(buf)
            }
        }
    }
}

#[derive(Clone)]
enum Scripted {
    Body { status: u16, body: String },
    BrokenBody { status: u16 },
}

#[derive(Default)]
struct TransportState {
    script: VecDeque<Scripted>,
    always: Option<Scripted>,
    fail: bool,
    requests: Vec<Request>,
    bodies: Vec<DropFlag>,
}

// Scripted in-memory transport that records every request it receives.
#[derive(Clone, Default)]
pub(crate) struct RecordingTransport {
    state: Arc<Mutex<TransportState>>,
}

impl RecordingTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, status: u16, body: &str) -> Self {
        self.push(Scripted::Body {
            status,
            body: body.to_string(),
        })
    }

    pub(crate) fn respond_with_broken_body(self, status: u16) -> Self {
        self.push(Scripted::BrokenBody { status })
    }

    pub(crate) fn respond_always(self, status: u16, body: &str) -> Self {
        {
            let mut state = self.state.lock().expect("transport mutex poisoned");
            state.always = Some(Scripted::Body {
                status,
                body: body.to_string(),
            });
        }
        self
    }

    pub(crate) fn fail_transport(self) -> Self {
        self.state.lock().expect("transport mutex poisoned").fail = true;
        self
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.state
            .lock()
            .expect("transport mutex poisoned")
            .requests
            .clone()
    }

    pub(crate) fn all_bodies_released(&self) -> bool {
        self.state
            .lock()
            .expect("transport mutex poisoned")
            .bodies
            .iter()
            .all(DropFlag::is_dropped)
    }

    fn push(self, scripted: Scripted) -> Self {
        self.state
            .lock()
            .expect("transport mutex poisoned")
            .script
            .push_back(scripted);
        self
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: Request) -> Result<TransportResponse, ClientError> {
        let mut state = self.state.lock().expect("transport mutex poisoned");
        state.requests.push(request);

        if state.fail {
            return Err(ClientError::transport(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )));
        }

        let scripted = match state.script.pop_front().or_else(|| state.always.clone()) {
            Some(scripted) => scripted,
            None => {
                return Err(ClientError::transport(io::Error::other(
                    "no scripted response left",
                )));
            }
        };

        let (status, body): (u16, Box<dyn Read + Send>) = match scripted {
            Scripted::Body { status, body } => {
                let (flag, reader) = DropFlag::wrap(Cursor::new(body.into_bytes()));
                state.bodies.push(flag);
                (status, Box::new(reader))
            }
            Scripted::BrokenBody { status } => {
                let (flag, reader) = DropFlag::wrap(FailingReader::after(b"{\"status".to_vec()));
                state.bodies.push(flag);
                (status, Box::new(reader))
            }
        };

        Ok(TransportResponse { status, body })
    }
}
