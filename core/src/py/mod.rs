use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::pipeline::build_figure_json;

// ──────────────────────────────────────────────────────────────────────────────
// Python entry points (JSON strings in/out, no pyo3 serde feature)
// ──────────────────────────────────────────────────────────────────────────────

/// `build_chart_json('{"exercise": ..., "table": {...}, "injuries": ..., "config": ...}')`
#[pyfunction]
fn build_chart_json(json_in: &str) -> PyResult<String> {
    build_figure_json(json_in).map_err(PyValueError::new_err)
}

/// Accepts a dict as well as a str; returns a dict via Python's json module.
#[pyfunction]
fn build_chart(py: Python<'_>, payload: &PyAny) -> PyResult<PyObject> {
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;

    let json_in: String = if let Ok(s) = payload.extract::<&str>() {
        s.to_owned()
    } else {
        json_mod
            .call_method1("dumps", (payload,))
            .and_then(|o| o.extract::<String>())
            .map_err(|e| PyValueError::new_err(format!("json.dumps failed on payload: {e}")))?
    };

    let out = build_figure_json(&json_in).map_err(PyValueError::new_err)?;
    let obj = json_mod
        .call_method1("loads", (out.as_str(),))
        .map_err(|e| PyValueError::new_err(format!("internal JSON error via json.loads: {e}")))?;
    Ok(obj.into_py(py))
}

#[pymodule]
fn liftgraph_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(build_chart_json, m)?)?;
    m.add_function(wrap_pyfunction!(build_chart, m)?)?;
    Ok(())
}
