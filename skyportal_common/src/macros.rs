/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

/*
 * we intercept logging/tracing macros here to have a central place where we can remove/replace them
 */

#[macro_export]
macro_rules! trace {
    ( $( $t:tt )* ) => { $crate::macros::tracing::trace!( $( $t )* ) }
}

#[macro_export]
macro_rules! debug {
    ( $( $t:tt )* ) => { $crate::macros::tracing::debug!( $( $t )* ) }
}

#[macro_export]
macro_rules! info {
    ( $( $t:tt )* ) => { $crate::macros::tracing::info!( $( $t )* ) }
}

#[macro_export]
macro_rules! warn {
    ( $( $t:tt )* ) => { $crate::macros::tracing::warn!( $( $t )* ) }
}

#[macro_export]
macro_rules! error {
    ( $( $t:tt )* ) => { $crate::macros::tracing::error!( $( $t )* ) }
}

// re-exported so that crates using the macros above do not need their own tracing dependency
pub use tracing;

#[macro_export]
macro_rules! io_error {
    ( $kind:expr, $fmt:literal $(, $($arg:expr),* )? ) =>
    {
        std::io::Error::new( $kind, format!($fmt, $( $($arg),* )?).as_str())
    }
}

/// syntactic sugar macro to define thiserror Error enums:
/// ```ignore
/// define_error!{ pub NetError =
///   Io( #[from] std::io::Error ) : "IO error: {0}",
///   Transport(String) : "transport error: {0}"
/// }
/// ```
/// will get expanded into
/// ```ignore
/// #[derive(thiserror::Error,Debug)]
/// pub enum NetError {
///     #[error("IO error: {0}")]
///     Io(#[from] std::io::Error),
///
///     #[error("transport error: {0}")]
///     Transport(String),
/// }
/// ```
/// Note that the expanding crate needs a `thiserror` dependency
#[macro_export]
macro_rules! define_error {
    ($vis:vis $name:ident = $( $err_variant:ident ( $( $( #[$meta:meta] )? $field_type:ty),* ) : $msg_lit:literal ),*) => {
        #[derive(thiserror::Error,Debug)]
        $vis enum $name {
            $(
                #[error($msg_lit)]
                $err_variant ( $( $(#[$meta])? $field_type ),*  )
            ),*
        }
    }
}
