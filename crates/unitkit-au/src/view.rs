//! Cocoa view construction for audio units.
//!
//! A unit with its own UI advertises it through the Cocoa UI property: a
//! bundle URL plus the name of a factory class implementing
//! `AUCocoaUIBase`. Units without one get CoreAudioKit's `AUGenericView`.

use std::ffi::c_void;
use std::mem;
use std::ptr;

use objc2::encode::{Encode, Encoding};
use objc2::rc::{Allocated, Retained};
use objc2::runtime::{AnyClass, AnyObject};
use objc2::{class, msg_send, sel};
use objc2_foundation::{NSSize, NSString};
use unitkit_core::{Scope, UnitError, UnitResult, ViewSize};

use crate::sys::{self, property};

/// An `NSView` produced for a unit.
#[derive(Debug)]
pub struct CocoaView(Retained<AnyObject>);

impl CocoaView {
    pub fn as_object(&self) -> &AnyObject {
        &self.0
    }

    /// Raw `NSView *`, for embedding through other bindings.
    pub fn as_ptr(&self) -> *mut c_void {
        Retained::as_ptr(&self.0) as *mut c_void
    }

    pub fn into_retained(self) -> Retained<AnyObject> {
        self.0
    }
}

/// `AudioUnit` as an Objective-C method argument.
///
/// Methods taking an `AudioUnit` are encoded with the record's struct name,
/// which a bare `*mut c_void` would not match.
#[repr(transparent)]
#[derive(Clone, Copy)]
struct UnitArg(sys::AudioUnit);

// SAFETY: UnitArg is a transparent pointer to the ComponentInstanceRecord
// struct, matching the `AudioUnit` typedef's encoding.
unsafe impl Encode for UnitArg {
    const ENCODING: Encoding =
        Encoding::Pointer(&Encoding::Struct("ComponentInstanceRecord", &[]));
}

/// Whether the unit advertises a Cocoa UI.
pub(crate) fn has_cocoa_view(unit: sys::AudioUnit) -> bool {
    let mut size = 0u32;
    let mut writable = 0u8;
    // SAFETY: both out pointers are valid.
    let status = unsafe {
        sys::AudioUnitGetPropertyInfo(
            unit,
            property::COCOA_UI,
            Scope::GLOBAL.as_u32(),
            0,
            &mut size,
            &mut writable,
        )
    };
    status.is_ok() && size as usize > mem::size_of::<sys::CFURLRef>()
}

/// Build the unit's own Cocoa view.
///
/// # Safety
///
/// `unit` must be a valid, open unit.
pub(crate) unsafe fn create_cocoa_view(
    unit: sys::AudioUnit,
    size: ViewSize,
) -> UnitResult<Option<CocoaView>> {
    let mut data_size = 0u32;
    let mut writable = 0u8;
    // SAFETY: both out pointers are valid.
    unsafe {
        sys::AudioUnitGetPropertyInfo(
            unit,
            property::COCOA_UI,
            Scope::GLOBAL.as_u32(),
            0,
            &mut data_size,
            &mut writable,
        )
    }
    .check()?;

    // AudioUnitCocoaViewInfo: a bundle URL followed by one or more class names
    let slot = mem::size_of::<*const c_void>();
    let slots = data_size as usize / slot;
    if slots < 2 {
        return Ok(None);
    }

    let mut info: Vec<*const c_void> = vec![ptr::null(); slots];
    let mut io_size = (slots * slot) as u32;
    // SAFETY: `info` provides `io_size` writable bytes.
    unsafe {
        sys::AudioUnitGetProperty(
            unit,
            property::COCOA_UI,
            Scope::GLOBAL.as_u32(),
            0,
            info.as_mut_ptr() as *mut c_void,
            &mut io_size,
        )
    }
    .check()?;

    // SAFETY: info[0] is a CFURL and info[1] a CFString, both retained for us.
    let view = unsafe { load_factory_view(unit, info[0], info[1], size) };

    for entry in info.iter().filter(|p| !p.is_null()) {
        // SAFETY: every non-null entry was retained by the property getter.
        unsafe { sys::CFRelease(*entry) };
    }

    view
}

/// Instantiate the view factory class from the UI bundle and ask it for a view.
///
/// # Safety
///
/// `bundle_url` must be null or a CFURL, `class_name` null or a CFString.
unsafe fn load_factory_view(
    unit: sys::AudioUnit,
    bundle_url: sys::CFURLRef,
    class_name: sys::CFStringRef,
    size: ViewSize,
) -> UnitResult<Option<CocoaView>> {
    if bundle_url.is_null() || class_name.is_null() {
        return Ok(None);
    }

    // SAFETY: CFURL and CFString are toll-free bridged with NSURL and
    // NSString. All messages below are sent to live objects with the
    // signatures AppKit and CoreAudioKit declare.
    unsafe {
        let url: &AnyObject = &*(bundle_url as *const AnyObject);
        let name: &NSString = &*(class_name as *const NSString);

        let bundle: Option<Retained<AnyObject>> = msg_send![class!(NSBundle), bundleWithURL: url];
        let Some(bundle) = bundle else {
            return Err(UnitError::ViewUnavailable(format!(
                "view bundle for {} could not be loaded",
                name
            )));
        };

        let factory_class: Option<&AnyClass> = msg_send![&*bundle, classNamed: name];
        let Some(factory_class) = factory_class else {
            return Err(UnitError::ViewUnavailable(format!(
                "view factory class {} not found",
                name
            )));
        };

        let factory: Option<Retained<AnyObject>> = msg_send![factory_class, new];
        let Some(factory) = factory else {
            return Err(UnitError::ViewUnavailable(format!(
                "view factory {} could not be created",
                name
            )));
        };

        let responds: bool =
            msg_send![&*factory, respondsToSelector: sel!(uiViewForAudioUnit:withSize:)];
        if !responds {
            return Err(UnitError::ViewUnavailable(format!(
                "{} does not implement AUCocoaUIBase",
                name
            )));
        }

        let view: Option<Retained<AnyObject>> = msg_send![
            &*factory,
            uiViewForAudioUnit: UnitArg(unit),
            withSize: NSSize::new(size.width, size.height)
        ];
        log::debug!("Built custom view from {}", name);
        Ok(view.map(CocoaView))
    }
}

/// Build CoreAudioKit's generic parameter view.
///
/// # Safety
///
/// `unit` must be a valid, open unit.
pub(crate) unsafe fn create_generic_view(unit: sys::AudioUnit) -> UnitResult<CocoaView> {
    let class = AnyClass::get(c"AUGenericView").ok_or_else(|| {
        UnitError::ViewUnavailable("AUGenericView is not available".to_string())
    })?;

    // SAFETY: AUGenericView declares `initWithAudioUnit:`.
    let view: Option<Retained<AnyObject>> = unsafe {
        let view: Allocated<AnyObject> = msg_send![class, alloc];
        msg_send![view, initWithAudioUnit: UnitArg(unit)]
    };

    view.map(CocoaView)
        .ok_or_else(|| UnitError::ViewUnavailable("AUGenericView failed to initialize".to_string()))
}
