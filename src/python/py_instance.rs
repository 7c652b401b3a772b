//! Session binding for Python hosts.

use std::path::PathBuf;

use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use super::py_rules::PyClassLoader;
use crate::core::{EngineError, SessionError};
use crate::session::Instance;

/// Convert a session error into the matching Python exception.
///
/// Exceptions raised by Python rules engines are re-raised as they were.
pub fn session_error_to_py(err: SessionError) -> PyErr {
    match err {
        SessionError::Engine(EngineError::Python(e)) => e,
        SessionError::Participation(_) => PyValueError::new_err(err.to_string()),
        SessionError::Io { .. } => PyOSError::new_err(err.to_string()),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

/// Python wrapper for Instance.
///
/// Rules engine classes are imported with the Python import system. Session
/// operations release the GIL while waiting for the session lock.
#[pyclass(name = "Instance")]
pub struct PyInstance {
    inner: Instance,
}

#[pymethods]
impl PyInstance {
    /// Create a session.
    ///
    /// # Arguments
    /// - instance_type: Directory name of the instance type under `root`
    /// - user_ids: Participants in seat order
    /// - root: Directory containing instance types (default: ".")
    #[new]
    #[pyo3(signature = (instance_type, user_ids, root = None))]
    fn new(instance_type: String, user_ids: Vec<String>, root: Option<PathBuf>) -> PyResult<Self> {
        let inner = Instance::builder(instance_type)
            .root(root.unwrap_or_else(|| PathBuf::from(".")))
            .users(user_ids)
            .build(&PyClassLoader)
            .map_err(session_error_to_py)?;
        Ok(Self { inner })
    }

    /// Apply an action on behalf of a user.
    fn perform_action(&self, py: Python<'_>, user_id: &str, action: &str) -> PyResult<()> {
        py.allow_threads(|| self.inner.perform_action(user_id, action))
            .map_err(session_error_to_py)
    }

    /// Render markup for one user, or a dict for every user if omitted.
    #[pyo3(signature = (user_id = None))]
    fn render_markup(&self, py: Python<'_>, user_id: Option<&str>) -> PyResult<PyObject> {
        match user_id {
            Some(user_id) => {
                let markup = py
                    .allow_threads(|| self.inner.render_markup(user_id))
                    .map_err(session_error_to_py)?;
                Ok(markup.into_py(py))
            }
            None => {
                let all = py
                    .allow_threads(|| self.inner.render_markup_all())
                    .map_err(session_error_to_py)?;
                Ok(all.into_py(py))
            }
        }
    }

    /// Seat of a user, or None.
    fn player_index(&self, user_id: &str) -> Option<usize> {
        self.inner.player_index(user_id).map(|p| p.index())
    }

    /// User ids in seat order.
    #[getter]
    fn user_ids(&self) -> Vec<String> {
        self.inner.user_ids().to_vec()
    }

    /// Instance type.
    #[getter]
    fn instance_type(&self) -> &str {
        self.inner.instance_type()
    }

    /// Rules engine class reference.
    #[getter]
    fn game_class(&self) -> String {
        self.inner.game_class().to_string()
    }

    /// Game descriptor as a JSON string.
    fn descriptor_json(&self) -> PyResult<String> {
        serde_json::to_string(self.inner.descriptor())
            .map_err(|e| PyRuntimeError::new_err(e.to_string()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Instance(type={}, players={})",
            self.inner.instance_type(),
            self.inner.player_count()
        )
    }
}
