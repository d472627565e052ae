//! XML codec — frames to commands, vectors to XML.
//!
//! Decoding goes through `quick_xml::de` into small serde structs, one per
//! inbound element. Encoding uses the `quick_xml` event writer so attribute
//! order is fixed and values are escaped.

use bytes::Bytes;
use indidrive_app::ports::{RawFrame, WireCodec};
use indidrive_domain::command::{Command, GetProperties, PROTOCOL_VERSION, SetSwitch};
use indidrive_domain::error::InvalidValue;
use indidrive_domain::property::{PropertyKind, PropertyState, SwitchState};
use indidrive_domain::time;
use indidrive_domain::vector::{Vector, VectorKind};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("frame is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("malformed XML")]
    Malformed(#[from] quick_xml::DeError),
    #[error("unsupported protocol version {0:?}")]
    Version(Option<String>),
    #[error("unsupported element <{0}>")]
    Unsupported(&'static str),
    #[error(transparent)]
    InvalidValue(#[from] InvalidValue),
    #[error("failed to write XML")]
    Write(#[from] quick_xml::Error),
    #[error("failed to write XML")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Deserialize)]
struct GetPropertiesXml {
    #[serde(rename = "@version")]
    version: Option<String>,
    #[serde(rename = "@device")]
    device: Option<String>,
    #[serde(rename = "@name")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NewSwitchVectorXml {
    #[serde(rename = "@device")]
    device: String,
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "oneSwitch", default)]
    switches: Vec<OneSwitchXml>,
}

#[derive(Debug, Deserialize)]
struct OneSwitchXml {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "$text", default)]
    value: String,
}

/// The XML property-vector wire format.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlCodec;

impl XmlCodec {
    fn get_properties(xml: &str) -> Result<Command, CodecError> {
        let raw: GetPropertiesXml = quick_xml::de::from_str(xml)?;
        match raw.version {
            Some(version) if version == PROTOCOL_VERSION => {
                Ok(Command::GetProperties(GetProperties {
                    version,
                    device: raw.device,
                    name: raw.name,
                }))
            }
            other => Err(CodecError::Version(other)),
        }
    }

    /// One bad switch value rejects the whole vector.
    fn new_switch_vector(xml: &str) -> Result<Command, CodecError> {
        let raw: NewSwitchVectorXml = quick_xml::de::from_str(xml)?;
        let switches = raw
            .switches
            .into_iter()
            .map(|s| Ok((s.name, s.value.parse::<SwitchState>()?)))
            .collect::<Result<Vec<_>, InvalidValue>>()?;
        Ok(Command::SetSwitch(SetSwitch {
            device: raw.device,
            name: raw.name,
            switches,
        }))
    }
}

impl WireCodec for XmlCodec {
    type Error = CodecError;

    fn decode(&self, frame: &RawFrame) -> Result<Command, Self::Error> {
        let xml = std::str::from_utf8(&frame.bytes)?;
        match frame.tag {
            "getProperties" => Self::get_properties(xml),
            "newSwitchVector" => Self::new_switch_vector(xml),
            other => Err(CodecError::Unsupported(other)),
        }
    }

    fn encode(&self, vector: &Vector) -> Result<Bytes, Self::Error> {
        let property = vector.property();
        let definition = vector.kind() == VectorKind::Definition;

        let mut root = BytesStart::new(vector.tag());
        root.push_attribute(("device", property.device));
        root.push_attribute(("name", property.name));
        if definition {
            root.push_attribute(("label", property.label));
            root.push_attribute(("group", property.group));
        }
        if let Some(state) = vector_state(vector) {
            root.push_attribute(("state", state.as_str()));
        }
        if definition {
            match property.kind {
                PropertyKind::Switch { perm, rule } => {
                    root.push_attribute(("perm", perm.as_str()));
                    root.push_attribute(("rule", rule.as_str()));
                }
                PropertyKind::Number { perm, .. } => root.push_attribute(("perm", perm.as_str())),
                PropertyKind::Light => {}
            }
        }
        let timestamp = time::format(&vector_timestamp(vector));
        root.push_attribute(("timestamp", timestamp.as_str()));
        if let Vector::Number(number) = vector
            && let Some(message) = number.message.as_deref()
        {
            root.push_attribute(("message", message));
        }

        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Start(root))?;

        let element = vector.element_tag();
        match vector {
            Vector::Switch(v) => {
                for (name, value) in &v.switches {
                    write_element(&mut writer, element, &[("name", *name)], value.as_str())?;
                }
            }
            Vector::Light(v) => {
                for (name, value) in &v.lights {
                    write_element(&mut writer, element, &[("name", *name)], value.as_str())?;
                }
            }
            Vector::Number(v) => {
                let PropertyKind::Number {
                    format,
                    decimals,
                    min,
                    max,
                    step,
                    ..
                } = property.kind
                else {
                    return Err(CodecError::Unsupported(vector.tag()));
                };
                let (min, max, step) = (min.to_string(), max.to_string(), step.to_string());
                for (name, value) in &v.numbers {
                    let text = format!("{value:.decimals$}");
                    if definition {
                        let attributes = [
                            ("name", *name),
                            ("format", format),
                            ("min", min.as_str()),
                            ("max", max.as_str()),
                            ("step", step.as_str()),
                        ];
                        write_element(&mut writer, element, &attributes, &text)?;
                    } else {
                        write_element(&mut writer, element, &[("name", *name)], &text)?;
                    }
                }
            }
        }

        writer.write_event(Event::End(BytesEnd::new(vector.tag())))?;
        Ok(Bytes::from(writer.into_inner()))
    }
}

fn vector_state(vector: &Vector) -> Option<PropertyState> {
    match vector {
        Vector::Switch(v) => Some(v.state),
        Vector::Light(v) => v.state,
        Vector::Number(v) => v.state,
    }
}

fn vector_timestamp(vector: &Vector) -> time::Timestamp {
    match vector {
        Vector::Switch(v) => v.timestamp,
        Vector::Light(v) => v.timestamp,
        Vector::Number(v) => v.timestamp,
    }
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    attributes: &[(&str, &str)],
    text: &str,
) -> Result<(), CodecError> {
    let mut start = BytesStart::new(tag);
    for attribute in attributes {
        start.push_attribute(*attribute);
    }
    writer.write_event(Event::Start(start))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}
