//! MIDI output: device enumeration, connection, and message sending via a dedicated thread.
//!
//! Unlike a fire-and-forget sender, every connect and send waits for the
//! output thread's acknowledgement so transport failures reach the caller.

use crate::error::{Error, Result};
use crate::message::MidiOutputMessage;
use crossbeam_channel::{bounded, Receiver, Sender};
use midir::{MidiOutput, MidiOutputConnection};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tracing::{debug, info, warn};

const CLIENT_NAME: &str = "uta-midi-output";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MidiOutputDevice {
    pub index: usize,
    pub name: String,
}

enum MidiOutputCommand {
    Connect(usize, Sender<Result<String>>),
    Disconnect,
    SendMessage(MidiOutputMessage, Sender<Result<()>>),
    Shutdown,
}

pub struct MidiOutputManager {
    command_sender: Sender<MidiOutputCommand>,
    connected_device: Arc<arc_swap::ArcSwap<Option<String>>>,
    is_connected: Arc<AtomicBool>,
}

impl MidiOutputManager {
    pub fn new() -> Result<Self> {
        let (command_sender, command_receiver) = bounded(64);
        let connected_device = Arc::new(arc_swap::ArcSwap::new(Arc::new(None)));
        let is_connected = Arc::new(AtomicBool::new(false));

        let connected_device_clone = Arc::clone(&connected_device);
        let is_connected_clone = Arc::clone(&is_connected);

        thread::Builder::new()
            .name("uta-midi-output".to_string())
            .spawn(move || {
                Self::midi_output_thread(
                    command_receiver,
                    connected_device_clone,
                    is_connected_clone,
                );
            })
            .map_err(|e| Error::MidiDevice(format!("failed to spawn MIDI output thread: {e}")))?;

        Ok(Self {
            command_sender,
            connected_device,
            is_connected,
        })
    }

    fn midi_output_thread(
        command_receiver: Receiver<MidiOutputCommand>,
        connected_device: Arc<arc_swap::ArcSwap<Option<String>>>,
        is_connected: Arc<AtomicBool>,
    ) {
        let mut connection: Option<MidiOutputConnection> = None;

        loop {
            match command_receiver.recv_timeout(std::time::Duration::from_millis(100)) {
                Ok(MidiOutputCommand::Connect(device_index, reply)) => {
                    if let Some(conn) = connection.take() {
                        conn.close();
                    }

                    let result = match Self::connect_to_device(device_index) {
                        Ok((conn, name)) => {
                            info!(device = %name, "MIDI output connected");
                            connection = Some(conn);
                            is_connected.store(true, Ordering::SeqCst);
                            connected_device.store(Arc::new(Some(name.clone())));
                            Ok(name)
                        }
                        Err(e) => {
                            warn!(device_index, error = %e, "MIDI output connect failed");
                            is_connected.store(false, Ordering::SeqCst);
                            connected_device.store(Arc::new(None));
                            Err(e)
                        }
                    };
                    let _ = reply.send(result);
                }
                Ok(MidiOutputCommand::Disconnect) => {
                    if let Some(conn) = connection.take() {
                        conn.close();
                        is_connected.store(false, Ordering::SeqCst);
                        connected_device.store(Arc::new(None));
                        debug!("MIDI output disconnected");
                    }
                }
                Ok(MidiOutputCommand::SendMessage(msg, reply)) => {
                    let result = match connection.as_mut() {
                        Some(conn) => conn.send(&msg.bytes).map_err(Error::from),
                        None => Err(Error::MidiPort("no output device connected".to_string())),
                    };
                    let _ = reply.send(result);
                }
                Ok(MidiOutputCommand::Shutdown) => {
                    if let Some(conn) = connection.take() {
                        conn.close();
                    }
                    break;
                }
                Err(crossbeam_channel::RecvTimeoutError::Timeout) => {}
                Err(crossbeam_channel::RecvTimeoutError::Disconnected) => {
                    break;
                }
            }
        }
    }

    fn connect_to_device(device_index: usize) -> Result<(MidiOutputConnection, String)> {
        let midi_output = MidiOutput::new(CLIENT_NAME)?;

        let ports = midi_output.ports();
        let port = ports.get(device_index).ok_or_else(|| {
            Error::MidiDevice(format!("MIDI output device {} not found", device_index))
        })?;

        let port_name = midi_output
            .port_name(port)
            .unwrap_or_else(|_| format!("Device {}", device_index));

        let connection = midi_output.connect(port, "uta-output")?;

        Ok((connection, port_name))
    }

    pub fn list_devices() -> Vec<MidiOutputDevice> {
        let mut devices = Vec::new();
        if let Ok(midi_output) = MidiOutput::new("uta-device-list") {
            let ports = midi_output.ports();
            for (index, port) in ports.iter().enumerate() {
                let name = midi_output
                    .port_name(port)
                    .unwrap_or_else(|_| format!("Unknown Device {}", index));
                devices.push(MidiOutputDevice { index, name });
            }
        }
        devices
    }

    /// Returns the connected port name.
    pub fn connect(&self, device_index: usize) -> Result<String> {
        let (reply_tx, reply_rx) = bounded(1);
        self.command_sender
            .send(MidiOutputCommand::Connect(device_index, reply_tx))
            .map_err(|_| Error::Disconnected)?;
        reply_rx.recv().map_err(|_| Error::Disconnected)?
    }

    /// Case-insensitive partial match, first hit wins.
    pub fn connect_by_name(&self, name: &str) -> Result<String> {
        let devices = Self::list_devices();
        let device = find_device(&devices, name).ok_or_else(|| {
            Error::MidiDevice(format!("No MIDI output device found matching '{}'", name))
        })?;
        self.connect(device.index)
    }

    pub fn disconnect(&self) {
        let _ = self.command_sender.send(MidiOutputCommand::Disconnect);
    }

    /// Blocks until the output thread has handed the bytes to the driver.
    pub fn send_message(&self, message: MidiOutputMessage) -> Result<()> {
        let (reply_tx, reply_rx) = bounded(1);
        self.command_sender
            .send(MidiOutputCommand::SendMessage(message, reply_tx))
            .map_err(|_| Error::Disconnected)?;
        reply_rx.recv().map_err(|_| Error::Disconnected)?
    }

    pub fn is_connected(&self) -> bool {
        self.is_connected.load(Ordering::SeqCst)
    }

    pub fn connected_device_name(&self) -> Option<String> {
        self.connected_device.load().as_ref().clone()
    }
}

impl Drop for MidiOutputManager {
    fn drop(&mut self) {
        let _ = self.command_sender.send(MidiOutputCommand::Shutdown);
    }
}

pub(crate) fn find_device<'a>(
    devices: &'a [MidiOutputDevice],
    name: &str,
) -> Option<&'a MidiOutputDevice> {
    let needle = name.to_lowercase();
    devices
        .iter()
        .find(|d| d.name.to_lowercase().contains(&needle))
}
