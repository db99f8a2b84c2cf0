// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Call and result messages, one pair per RPC.
//!
//! A call message carries the arguments of one operation; the paired result
//! message carries its single return value in a field named `value`.

use crate::core::{Message, ObjectRef, Value};
use crate::schema::SchemaMessage;
use crate::service::{
    AtomPath, CapturePath, DevicePath, ImageInfoPath, Info, RenderSettings, StringTable,
    TimingFlags, TimingInfoPath,
};

/// A call message: the request half of one RPC.
pub trait Call: Message {
    /// Method name on the transport.
    const METHOD: &'static str;

    /// The paired result message.
    type Result: CallResult;
}

/// A result message: the success half of one RPC.
pub trait CallResult: Message {
    /// The operation's return value.
    type Value: Send;

    /// Wrap a return value in the envelope.
    fn from_value(value: Self::Value) -> Self;

    /// Take the return value out of the envelope.
    fn into_value(self) -> Self::Value;
}

message! {
    pub struct CallFollow = entity("service", "callFollow") {
        pub p / "p": (interface Path),
    }
}

message! {
    pub struct ResultFollow = entity("service", "resultFollow") {
        pub value / "value": (interface Path),
    }
}

message! {
    pub struct CallGet = entity("service", "callGet") {
        pub p / "p": (interface Path),
    }
}

message! {
    pub struct ResultGet = entity("service", "resultGet") {
        pub value / "value": any,
    }
}

message! {
    pub struct CallSet = entity("service", "callSet") {
        pub p / "p": (interface Path),
        pub v / "v": any,
    }
}

message! {
    pub struct ResultSet = entity("service", "resultSet") {
        pub value / "value": (interface Path),
    }
}

message! {
    pub struct CallGetAvailableStringTables = entity("service", "callGetAvailableStringTables") {}
}

message! {
    pub struct ResultGetAvailableStringTables = entity("service", "resultGetAvailableStringTables") {
        pub value / "value": (values Info),
    }
}

message! {
    pub struct CallGetCaptures = entity("service", "callGetCaptures") {}
}

message! {
    pub struct ResultGetCaptures = entity("service", "resultGetCaptures") {
        pub value / "value": (pointers CapturePath),
    }
}

message! {
    pub struct CallGetDevices = entity("service", "callGetDevices") {}
}

message! {
    pub struct ResultGetDevices = entity("service", "resultGetDevices") {
        pub value / "value": (pointers DevicePath),
    }
}

message! {
    pub struct CallGetFeatures = entity("service", "callGetFeatures") {}
}

message! {
    pub struct ResultGetFeatures = entity("service", "resultGetFeatures") {
        pub value / "value": strings,
    }
}

message! {
    pub struct CallGetFramebufferColor = entity("service", "callGetFramebufferColor") {
        pub device / "device": (pointer DevicePath),
        pub after / "after": (pointer AtomPath),
        pub settings / "settings": (value RenderSettings),
    }
}

message! {
    pub struct ResultGetFramebufferColor = entity("service", "resultGetFramebufferColor") {
        pub value / "value": (pointer ImageInfoPath),
    }
}

message! {
    pub struct CallGetFramebufferDepth = entity("service", "callGetFramebufferDepth") {
        pub device / "device": (pointer DevicePath),
        pub after / "after": (pointer AtomPath),
    }
}

message! {
    pub struct ResultGetFramebufferDepth = entity("service", "resultGetFramebufferDepth") {
        pub value / "value": (pointer ImageInfoPath),
    }
}

message! {
    pub struct CallGetSchema = entity("service", "callGetSchema") {}
}

message! {
    pub struct ResultGetSchema = entity("service", "resultGetSchema") {
        pub value / "value": (value SchemaMessage),
    }
}

message! {
    pub struct CallGetStringTable = entity("service", "callGetStringTable") {
        pub info / "info": (value Info),
    }
}

message! {
    pub struct ResultGetStringTable = entity("service", "resultGetStringTable") {
        pub value / "value": (value StringTable),
    }
}

message! {
    pub struct CallGetTimingInfo = entity("service", "callGetTimingInfo") {
        pub device / "device": (pointer DevicePath),
        pub capture / "capture": (pointer CapturePath),
        pub flags / "flags": (enum32 TimingFlags),
    }
}

message! {
    pub struct ResultGetTimingInfo = entity("service", "resultGetTimingInfo") {
        pub value / "value": (pointer TimingInfoPath),
    }
}

message! {
    pub struct CallImportCapture = entity("service", "callImportCapture") {
        pub name / "name": string,
        pub data / "Data": bytes,
    }
}

message! {
    pub struct ResultImportCapture = entity("service", "resultImportCapture") {
        pub value / "value": (pointer CapturePath),
    }
}

message! {
    pub struct CallLoadCapture = entity("service", "callLoadCapture") {
        pub path / "path": string,
    }
}

message! {
    pub struct ResultLoadCapture = entity("service", "resultLoadCapture") {
        pub value / "value": (pointer CapturePath),
    }
}

message! {
    pub struct CallRegisterAndroidDevice = entity("service", "callRegisterAndroidDevice") {
        pub serial / "serial": string,
    }
}

message! {
    pub struct ResultRegisterAndroidDevice = entity("service", "resultRegisterAndroidDevice") {
        pub value / "value": (pointer DevicePath),
    }
}

call!(CallFollow => ResultFollow: Option<ObjectRef>, "follow");
call!(CallGet => ResultGet: Value, "get");
call!(CallSet => ResultSet: Option<ObjectRef>, "set");
call!(CallGetAvailableStringTables => ResultGetAvailableStringTables: Vec<Info>, "getAvailableStringTables");
call!(CallGetCaptures => ResultGetCaptures: Vec<CapturePath>, "getCaptures");
call!(CallGetDevices => ResultGetDevices: Vec<DevicePath>, "getDevices");
call!(CallGetFeatures => ResultGetFeatures: Vec<String>, "getFeatures");
call!(CallGetFramebufferColor => ResultGetFramebufferColor: Option<ImageInfoPath>, "getFramebufferColor");
call!(CallGetFramebufferDepth => ResultGetFramebufferDepth: Option<ImageInfoPath>, "getFramebufferDepth");
call!(CallGetSchema => ResultGetSchema: SchemaMessage, "getSchema");
call!(CallGetStringTable => ResultGetStringTable: StringTable, "getStringTable");
call!(CallGetTimingInfo => ResultGetTimingInfo: Option<TimingInfoPath>, "getTimingInfo");
call!(CallImportCapture => ResultImportCapture: Option<CapturePath>, "importCapture");
call!(CallLoadCapture => ResultLoadCapture: Option<CapturePath>, "loadCapture");
call!(CallRegisterAndroidDevice => ResultRegisterAndroidDevice: Option<DevicePath>, "registerAndroidDevice");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_into_value() {
        let result = ResultGetFeatures {
            value: vec!["replay".into(), "timing".into()],
        };
        assert_eq!(result.into_value(), vec!["replay", "timing"]);
    }

    #[test]
    fn test_call_metadata() {
        assert_eq!(<CallGet as Call>::METHOD, "get");
        assert_eq!(CallGet::NAME, "service.callGet");
        assert_eq!(ResultGet::NAME, "service.resultGet");
        assert_ne!(CallGet::type_identity(), CallFollow::type_identity());
    }

    #[test]
    fn test_empty_call_encodes_nothing() {
        let mut buf = Vec::new();
        CallGetCaptures::default()
            .encode_fields(&mut crate::encoding::Encoder::new(&mut buf))
            .unwrap();
        assert!(buf.is_empty());
    }
}
