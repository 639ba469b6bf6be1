//! The assembled DNC memory module: controller + addressing + projection

use crate::controller::{Controller, Linear, LstmController};
use crate::error::DncError;
use crate::interface::{interface_len, Interface};
use crate::memory::MemoryState;
use anyhow::Result;
use chrono::{DateTime, Utc};
use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// Configuration for the memory module.
///
/// Five integers fix every shape in the system; `controller_size` only
/// parameterizes the bundled LSTM controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DncConfig {
    /// External input dimension X
    pub input_dim: usize,
    /// Output dimension Y
    pub output_dim: usize,
    /// Number of memory slots N
    pub memory_slots: usize,
    /// Width of one memory slot W
    pub slot_width: usize,
    /// Number of read heads R
    pub read_heads: usize,
    /// Hidden width of the bundled LSTM controller
    pub controller_size: usize,
}

impl Default for DncConfig {
    fn default() -> Self {
        Self {
            input_dim: 8,
            output_dim: 8,
            memory_slots: 64,
            slot_width: 16,
            read_heads: 2,
            controller_size: 128,
        }
    }
}

impl DncConfig {
    /// Interface vector length R·W + 3W + 5R + 3.
    pub fn interface_len(&self) -> usize {
        interface_len(self.slot_width, self.read_heads)
    }

    /// Controller input width: external input plus R·W read feedback.
    pub fn controller_input_len(&self) -> usize {
        self.input_dim + self.read_heads * self.slot_width
    }

    /// Required controller output width: raw output plus interface vector.
    pub fn controller_output_len(&self) -> usize {
        self.output_dim + self.interface_len()
    }

    /// Reject zero dimensions. Fatal at construction, never recoverable.
    pub fn validate(&self) -> Result<(), DncError> {
        for (field, value) in [
            ("input_dim", self.input_dim),
            ("output_dim", self.output_dim),
            ("memory_slots", self.memory_slots),
            ("slot_width", self.slot_width),
            ("read_heads", self.read_heads),
            ("controller_size", self.controller_size),
        ] {
            if value == 0 {
                return Err(DncError::InvalidDimension { field });
            }
        }
        Ok(())
    }
}

/// Controller, addressing machinery and the learned read projection.
///
/// The projection from the flattened read vectors to the output space is
/// the only learned parameter owned here; everything else learnable lives
/// in the controller.
#[derive(Debug)]
pub struct Dnc<C: Controller> {
    config: DncConfig,
    model_id: Uuid,
    created_at: DateTime<Utc>,
    controller: C,
    read_projection: Linear,
}

impl<C: Controller> Dnc<C> {
    /// Validate the configuration and the controller contract, then
    /// assemble the module. A controller whose output width does not match
    /// `output_dim + interface_len` is a fatal configuration error.
    pub fn new(config: DncConfig, controller: C) -> Result<Self> {
        config.validate()?;
        let expected = config.controller_output_len();
        if controller.output_dim() != expected {
            return Err(DncError::ControllerOutputMismatch {
                expected,
                actual: controller.output_dim(),
            }
            .into());
        }

        let mut rng = rand::thread_rng();
        let read_projection = Linear::new(
            config.read_heads * config.slot_width,
            config.output_dim,
            &mut rng,
        );
        let model_id = Uuid::new_v4();
        info!(
            "Initialized DNC memory module {}: N={} W={} R={} X={} Y={}",
            model_id,
            config.memory_slots,
            config.slot_width,
            config.read_heads,
            config.input_dim,
            config.output_dim
        );

        Ok(Self {
            config,
            model_id,
            created_at: Utc::now(),
            controller,
            read_projection,
        })
    }

    /// Start a sequence: clear the controller's recurrent state and hand
    /// back a zeroed [`MemoryState`] for the caller to thread through
    /// [`Dnc::step`].
    pub fn reset(&mut self) -> MemoryState {
        self.controller.reset();
        MemoryState::zeroed(
            self.config.memory_slots,
            self.config.slot_width,
            self.config.read_heads,
        )
    }

    /// One timestep: run the controller on the input and the previous read
    /// vectors, advance the memory, and combine the projected read vectors
    /// with the controller's raw output.
    pub fn step(
        &mut self,
        input: &Array1<f32>,
        state: &MemoryState,
    ) -> Result<(Array1<f32>, MemoryState)> {
        if input.len() != self.config.input_dim {
            return Err(DncError::InputLengthMismatch {
                expected: self.config.input_dim,
                actual: input.len(),
            }
            .into());
        }

        let (raw, xi) = self.controller.step(input, &state.read_vectors)?;
        let iface = Interface::parse(&xi, self.config.slot_width, self.config.read_heads)?;
        let next = state.advance(&iface);
        let output = self.read_projection.forward(&next.read_vectors) + &raw;

        debug!(
            "step: usage_sum={:.4} write_sum={:.4} write_gate={:.4}",
            next.usage.sum(),
            next.write_weights.sum(),
            iface.write_gate
        );
        Ok((output, next))
    }

    pub fn config(&self) -> &DncConfig {
        &self.config
    }

    pub fn model_id(&self) -> Uuid {
        self.model_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Dnc<LstmController> {
    /// Assemble a DNC around the bundled LSTM controller, sized from the
    /// configuration.
    pub fn with_lstm_controller(config: DncConfig) -> Result<Self> {
        let controller = LstmController::new(
            config.controller_input_len(),
            config.controller_size,
            config.output_dim,
            config.interface_len(),
        );
        Self::new(config, controller)
    }
}
