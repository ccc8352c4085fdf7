//! # Label Composer
//!
//! Formats the QR payload and visible caption strings for one record
//! according to the active profile's layout. Payload and caption are
//! formatted independently from the same record and may diverge (the
//! payload carries machine-oriented line endings, the caption carries
//! headings the scanner never sees).

use crate::error::EtiquetaError;
use crate::loader::Record;
use crate::profile::{LabelLayout, LabelProfile};

/// One `(payload, caption)` pair of a label.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// String encoded into the QR symbol.
    pub payload: String,
    /// Visible multi-line caption (`\n` separated).
    pub caption: String,
}

/// Everything the renderer needs for one label.
///
/// Single-QR layouts carry only `front`; cable and flag layouts carry a
/// `back` face for the far end of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub front: Face,
    pub back: Option<Face>,
}

/// Build the label spec for one record under the given profile.
pub fn spec_for(profile: &LabelProfile, record: &Record) -> Result<LabelSpec, EtiquetaError> {
    match &profile.layout {
        LabelLayout::Badge => badge_spec(record),
        LabelLayout::Hardware => hardware_spec(record),
        LabelLayout::Cable { .. } => cable_spec(record),
        LabelLayout::Flag { .. } => flag_spec(record),
    }
}

fn badge_spec(record: &Record) -> Result<LabelSpec, EtiquetaError> {
    let name = record.get("Name")?;
    let id = record.get("ID")?;
    let ip = record.get("IP")?;
    let division = record.get("Division")?;

    Ok(LabelSpec {
        front: Face {
            payload: format!("Name: {}\r\nIP: {}", name, ip),
            caption: format!("{}\nName: {}\nID: {}", division, name, id),
        },
        back: None,
    })
}

fn hardware_spec(record: &Record) -> Result<LabelSpec, EtiquetaError> {
    let name = record.get("Name")?;
    let id = record.get("ID")?;
    let ip = record.get("IP")?;
    let division = record.get("Division")?;
    let city = record.get("City")?;

    Ok(LabelSpec {
        front: Face {
            payload: format!("Name: {}\r\nIP: {}", name, ip),
            caption: format!("{}\n{}\nName: {}\nID: {}", city, division, name, id),
        },
        back: None,
    })
}

fn cable_spec(record: &Record) -> Result<LabelSpec, EtiquetaError> {
    let src = cable_face(record, "Source", "SrcName", "SrcIP", "SrcPort", "SrcODF")?;
    let trg = cable_face(record, "Destination", "TrgName", "TrgIP", "TrgPort", "TrgODF")?;
    Ok(LabelSpec {
        front: src,
        back: Some(trg),
    })
}

fn cable_face(
    record: &Record,
    heading: &str,
    name_col: &str,
    ip_col: &str,
    port_col: &str,
    odf_col: &str,
) -> Result<Face, EtiquetaError> {
    let name = record.get(name_col)?;
    let ip = record.get(ip_col)?;
    let port = record.get(port_col)?;

    let mut caption = format!("-={}=-\n{}\nIp: {}\nPort: {}", heading, name, ip, port);
    // ODF columns are optional; append only when present and non-empty
    if let Some(odf) = record.get_opt(odf_col) {
        if !odf.is_empty() {
            caption.push_str(&format!("\nODF: {}", odf));
        }
    }

    Ok(Face {
        payload: format!("{}\r\nIp: {}\r\nPort: {}", name, ip, port),
        caption,
    })
}

fn flag_spec(record: &Record) -> Result<LabelSpec, EtiquetaError> {
    let src = flag_face(record, "Source", "SrcName", "SrcIP", "SrcPort")?;
    let trg = flag_face(record, "Destination", "TrgName", "TrgIP", "TrgPort")?;
    Ok(LabelSpec {
        front: src,
        back: Some(trg),
    })
}

fn flag_face(
    record: &Record,
    heading: &str,
    name_col: &str,
    ip_col: &str,
    port_col: &str,
) -> Result<Face, EtiquetaError> {
    let name = record.get(name_col)?;
    let ip = record.get(ip_col)?;
    let port = record.get(port_col)?;

    Ok(Face {
        payload: format!("{}\nIP: {}\nPort: {}", name, ip, port),
        caption: format!("-={}=-\n{}\nIP: {}\nPORT: {}", heading, name, ip, port),
    })
}
