//! Abominable Inc "AC Controller".
//!
//! The controller exposes its state through output points modelled on the
//! building-automation object model, but under non-standard cluster codes.
//! Endpoint 10 carries the operation mode, 16 the fan speed and 13, 14, 15
//! plain on/off switches.

use std::sync::Arc;

use crate::error::Result;
use crate::quirk::{
    DeviceRegistry, EntityBinding, EntityBindingBuilder, Quirk, QuirkBuilder, ReportingConfig,
};
use crate::settings::Settings;
use crate::zcl::{
    AccessMode, AttributeDef, AttributeType, CLUSTER_REVISION, ClusterSchema, REPORTING_STATUS,
    ZclEnum,
};
use crate::zcl_enum;

pub const MANUFACTURER: &str = "Abominable Inc";
pub const MODEL: &str = "AC Controller";

pub const OPERATION_MODE_ENDPOINT: u8 = 10;
pub const EXTERNAL_THERMOMETER_ENDPOINT: u8 = 13;
pub const SWING_LOUVRE_ENDPOINT: u8 = 14;
pub const SLEEP_MODE_ENDPOINT: u8 = 15;
pub const FAN_SPEED_ENDPOINT: u8 = 16;

pub const PRESENT_VALUE: &str = "present_value";

zcl_enum!(
    /// Air conditioner operation mode.
    OperationMode, "OperationMode",
    Off => ("Off", 0x0000),
    Auto => ("Auto", 0x0001),
    Fan => ("Fan", 0x0002),
    Dehumidify => ("Dehumidify", 0x0003),
    Heat => ("Heat", 0x0004),
    Cool => ("Cool", 0x0005),
);

zcl_enum!(
    /// Indoor unit fan speed.
    FanMode, "FanMode",
    Slow => ("Slow", 0x0000),
    Medium => ("Medium", 0x0001),
    Fast => ("Fast", 0x0002),
    Ludicrous => ("Ludicrous", 0x0003),
    TurboLudicrous => ("Turbo_Ludicrous", 0x0004),
);

#[rustfmt::skip]
const BINARY_OUTPUT_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new(0x0004, "active_text", AttributeType::CharacterString, AccessMode::R_OPT_W),
    AttributeDef::new(0x001C, "description", AttributeType::CharacterString, AccessMode::R_OPT_W),
    AttributeDef::new(0x002E, "inactive_text", AttributeType::CharacterString, AccessMode::R_OPT_W),
    AttributeDef::new(0x0042, "minimum_off_time", AttributeType::Uint32, AccessMode::R_OPT_W),
    AttributeDef::new(0x0043, "minimum_on_time", AttributeType::Uint32, AccessMode::R_OPT_W),
    AttributeDef::new(0x0051, "out_of_service", AttributeType::Bool, AccessMode::R_OPT_W).mandatory(),
    AttributeDef::new(0x0054, "polarity", AttributeType::Enum8, AccessMode::R),
    AttributeDef::new(0x0055, PRESENT_VALUE, AttributeType::Bool, AccessMode::RWP).mandatory(),
    // 0x0057 priority_array has no representation in the attribute model
    AttributeDef::new(0x0067, "reliability", AttributeType::Enum8, AccessMode::R_OPT_W),
    AttributeDef::new(0x0068, "relinquish_default", AttributeType::Bool, AccessMode::R_OPT_W),
    AttributeDef::new(0x006A, "resolution", AttributeType::Single, AccessMode::R).unverified(),
    AttributeDef::new(0x006F, "status_flags", AttributeType::Bitmap8, AccessMode::R).mandatory(),
    AttributeDef::new(0x0075, "engineering_units", AttributeType::Enum16, AccessMode::R).unverified(),
    AttributeDef::new(0x0100, "application_type", AttributeType::Uint32, AccessMode::R),
    CLUSTER_REVISION,
    REPORTING_STATUS,
];

#[rustfmt::skip]
const MULTISTATE_OUTPUT_ATTRIBUTES: &[AttributeDef] = &[
    AttributeDef::new(0x000E, "state_text", AttributeType::CharacterStringList, AccessMode::R_OPT_W),
    AttributeDef::new(0x001C, "description", AttributeType::CharacterString, AccessMode::R_OPT_W),
    AttributeDef::new(0x004A, "number_of_states", AttributeType::Uint16, AccessMode::R_OPT_W).mandatory(),
    AttributeDef::new(0x0051, "out_of_service", AttributeType::Bool, AccessMode::R_OPT_W).mandatory(),
    AttributeDef::new(0x0055, PRESENT_VALUE, AttributeType::Uint16, AccessMode::RWP).mandatory(),
    // 0x0057 priority_array has no representation in the attribute model
    AttributeDef::new(0x0067, "reliability", AttributeType::Enum8, AccessMode::R_OPT_W),
    AttributeDef::new(0x0068, "relinquish_default", AttributeType::Uint16, AccessMode::R_OPT_W),
    AttributeDef::new(0x006F, "status_flags", AttributeType::Bitmap8, AccessMode::R).mandatory(),
    AttributeDef::new(0x0100, "application_type", AttributeType::Uint32, AccessMode::R),
    CLUSTER_REVISION,
    REPORTING_STATUS,
];

/// Binary (on/off) output point.
pub const BINARY_OUTPUT: ClusterSchema = ClusterSchema {
    id: 0xFF10,
    name: "BinaryOutput",
    ep_attribute: "binary_output",
    // the code sits in the manufacturer range but frames are sent without a manufacturer code
    manufacturer_specific: false,
    attributes: BINARY_OUTPUT_ATTRIBUTES,
};

/// Multi-state (selector) output point.
pub const MULTISTATE_OUTPUT: ClusterSchema = ClusterSchema {
    id: 0xFF13,
    name: "MultistateOutput",
    ep_attribute: "multistate_output",
    manufacturer_specific: false,
    attributes: MULTISTATE_OUTPUT_ATTRIBUTES,
};

const REPORTING: ReportingConfig = ReportingConfig::new(0, 30, 1);

fn switch(endpoint_id: u8, translation_key: &str, fallback_name: &str) -> EntityBindingBuilder {
    EntityBinding::switch()
        .endpoint_id(endpoint_id)
        .cluster_id(BINARY_OUTPUT.id)
        .attribute_name(PRESENT_VALUE)
        .reporting(REPORTING)
        .translation_key(translation_key)
        .fallback_name(fallback_name)
}

fn selector<E: ZclEnum>(
    endpoint_id: u8,
    translation_key: &str,
    fallback_name: &str,
) -> EntityBindingBuilder {
    EntityBinding::enumeration(E::VALUE_SET)
        .endpoint_id(endpoint_id)
        .cluster_id(MULTISTATE_OUTPUT.id)
        .attribute_name(PRESENT_VALUE)
        .reporting(REPORTING)
        .translation_key(translation_key)
        .fallback_name(fallback_name)
}

pub fn builder() -> QuirkBuilder {
    QuirkBuilder::new(MANUFACTURER, MODEL)
        .replaces(MULTISTATE_OUTPUT, OPERATION_MODE_ENDPOINT)
        .replaces(BINARY_OUTPUT, EXTERNAL_THERMOMETER_ENDPOINT)
        .replaces(BINARY_OUTPUT, SWING_LOUVRE_ENDPOINT)
        .replaces(BINARY_OUTPUT, SLEEP_MODE_ENDPOINT)
        .replaces(MULTISTATE_OUTPUT, FAN_SPEED_ENDPOINT)
        .entity(selector::<OperationMode>(
            OPERATION_MODE_ENDPOINT,
            "ac_mode",
            "Mode",
        ))
        .entity(switch(
            EXTERNAL_THERMOMETER_ENDPOINT,
            "use_external_thermometer",
            "External Thermometer",
        ))
        .entity(switch(SWING_LOUVRE_ENDPOINT, "swing_louvre", "Swing louvre"))
        .entity(switch(SLEEP_MODE_ENDPOINT, "sleep_mode", "Sleep mode"))
        .entity(selector::<FanMode>(FAN_SPEED_ENDPOINT, "fan_speed", "Fan speed"))
}

pub fn register(registry: &DeviceRegistry, settings: &Settings) -> Result<Arc<Quirk>> {
    builder()
        .allow_unverified(settings.allow_unverified_bindings())
        .add_to_registry(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuirkError;
    use crate::quirk::{EntityCommand, EntityKind, EntityValue};
    use crate::zcl::{AttributeValue, EnumValueSet};

    const VALUE_SETS: [EnumValueSet; 2] = [OperationMode::VALUE_SET, FanMode::VALUE_SET];

    fn registered() -> Arc<Quirk> {
        register(&DeviceRegistry::new(), &Settings::default()).unwrap()
    }

    #[test]
    fn test_value_sets_are_unique() {
        for set in VALUE_SETS {
            assert!(set.validate().is_ok(), "{} has duplicates", set.name);
        }
        assert_eq!(OperationMode::VALUE_SET.len(), 6);
        assert_eq!(FanMode::VALUE_SET.len(), 5);
    }

    #[test]
    fn test_value_set_round_trip() {
        for set in VALUE_SETS {
            for label in set.labels() {
                let code = set.code(label).unwrap();
                assert_eq!(set.label(code).unwrap(), label);
            }
        }
        for code in 0..=5u16 {
            let mode = OperationMode::try_from(code).unwrap();
            assert_eq!(u16::from(mode), code);
        }
        assert_eq!(FanMode::TurboLudicrous.to_string(), "Turbo_Ludicrous");
    }

    #[test]
    fn test_unknown_mode_code() {
        assert_eq!(
            OperationMode::try_from(0x0006u16),
            Err(QuirkError::UnknownEnumValue {
                set: "OperationMode",
                code: 0x0006
            })
        );
    }

    #[test]
    fn test_cluster_schemas_are_unique() {
        for cluster in [BINARY_OUTPUT, MULTISTATE_OUTPUT] {
            assert!(cluster.validate().is_ok(), "{} has duplicates", cluster.name);
            assert!(cluster.attribute(0xFFFD).is_some());
            assert!(cluster.attribute(0xFFFE).is_some());
        }
    }

    #[test]
    fn test_unverified_attributes_flagged() {
        let names: Vec<_> = BINARY_OUTPUT.unverified_attributes().map(|a| a.name).collect();
        assert_eq!(names, vec!["resolution", "engineering_units"]);
        assert_eq!(MULTISTATE_OUTPUT.unverified_attributes().count(), 0);
    }

    #[test]
    fn test_mandatory_attributes() {
        let names: Vec<_> = MULTISTATE_OUTPUT.mandatory_attributes().map(|a| a.name).collect();
        assert_eq!(
            names,
            vec!["number_of_states", "out_of_service", PRESENT_VALUE, "status_flags"]
        );
    }

    #[test]
    fn test_write_to_read_only_rejected() {
        assert!(matches!(
            BINARY_OUTPUT.check_write(0x006F, &AttributeValue::Bitmap8(0)),
            Err(QuirkError::PermissionDenied {
                operation: "write",
                ..
            })
        ));
        assert!(matches!(
            MULTISTATE_OUTPUT.check_write(0x0100, &AttributeValue::Uint32(1)),
            Err(QuirkError::PermissionDenied { .. })
        ));
        assert!(BINARY_OUTPUT
            .check_write(0x0051, &AttributeValue::Bool(true))
            .is_ok());
    }

    #[test]
    fn test_quirk_layout() {
        let quirk = registered();
        assert_eq!(quirk.replacements().len(), 5);
        assert_eq!(quirk.entities().len(), 5);
        assert_eq!(quirk.cluster(10, 0xFF13), Some(&MULTISTATE_OUTPUT));
        assert_eq!(quirk.cluster(13, 0xFF10), Some(&BINARY_OUTPUT));
        assert!(quirk.cluster(10, 0xFF10).is_none());

        let fan = quirk.entity(16, 0xFF13, PRESENT_VALUE).unwrap();
        assert_eq!(
            fan.kind,
            EntityKind::Enum {
                value_set: FanMode::VALUE_SET
            }
        );
        assert_eq!(fan.translation_key, "fan_speed");
        assert_eq!(fan.reporting, Some(ReportingConfig::new(0, 30, 1)));
    }

    #[test]
    fn test_register_twice_is_idempotent() {
        let registry = DeviceRegistry::new();
        let first = register(&registry, &Settings::default()).unwrap();
        let second = register(&registry, &Settings::default()).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(MANUFACTURER, MODEL).unwrap().entities().len(), 5);
    }

    #[test]
    fn test_conflicting_registration_rejected() {
        let registry = DeviceRegistry::new();
        register(&registry, &Settings::default()).unwrap();
        let reduced = QuirkBuilder::new(MANUFACTURER, MODEL)
            .replaces(BINARY_OUTPUT, SLEEP_MODE_ENDPOINT)
            .entity(switch(SLEEP_MODE_ENDPOINT, "sleep_mode", "Sleep mode"))
            .add_to_registry(&registry);
        assert!(matches!(
            reduced,
            Err(QuirkError::RegistrationConflict { .. })
        ));
    }

    #[test]
    fn test_mode_heat_resolves() {
        let state = registered()
            .resolve(10, 0xFF13, 0x0055, &AttributeValue::Uint16(0x0004))
            .unwrap();
        assert_eq!(state.value, EntityValue::Enum("Heat"));
        assert_eq!(state.translation_key, "ac_mode");
        assert_eq!(state.fallback_name, "Mode");
    }

    #[test]
    fn test_external_thermometer_resolves_on() {
        let state = registered()
            .resolve(13, 0xFF10, 0x0055, &AttributeValue::Bool(true))
            .unwrap();
        assert_eq!(state.fallback_name, "External Thermometer");
        assert_eq!(state.translation_key, "use_external_thermometer");
        assert_eq!(state.value.to_string(), "on");
    }

    #[test]
    fn test_unknown_fan_code_reported() {
        let err = registered()
            .resolve(16, 0xFF13, 0x0055, &AttributeValue::Uint16(0x0009))
            .unwrap_err();
        assert_eq!(
            err,
            QuirkError::UnknownEnumValue {
                set: "FanMode",
                code: 0x0009
            }
        );
    }

    #[test]
    fn test_select_cool_writes_code() {
        let write = registered()
            .command(
                OPERATION_MODE_ENDPOINT,
                MULTISTATE_OUTPUT.id,
                PRESENT_VALUE,
                &EntityCommand::Select("Cool".to_string()),
            )
            .unwrap();
        assert_eq!(write.attribute_id, 0x0055);
        assert_eq!(
            write.value,
            AttributeValue::Uint16(u16::from(OperationMode::Cool))
        );
    }

    #[test]
    fn test_unbound_attribute_not_resolved() {
        assert!(matches!(
            registered().resolve(13, 0xFF10, 0x0051, &AttributeValue::Bool(false)),
            Err(QuirkError::BindingNotFound { .. })
        ));
    }
}
