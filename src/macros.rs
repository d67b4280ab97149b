//! Utility macros.
//!
//! - `MK_OPCODES!` - Declares the `Opcode` enum together with its mnemonic
//!   and operand shape tables

/// Declares the `Opcode` enum from a table of `Variant => "mnemonic", Shape;`
/// rows.
///
/// Generates the enum, an `Opcode::ALL` slice in table order, and the
/// `mnemonic` and `shape` accessors. `OperandShape` must be in scope at the
/// call site.
///
/// # Example
///
/// ```ignore
/// MK_OPCODES! {
///     NoOp => "noOp", Nothing;
///     Goto => "gotoOp", Addr;
/// }
/// ```
#[macro_export]
macro_rules! MK_OPCODES {
    ($($variant:ident => $mnemonic:literal, $shape:ident;)*) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $($variant,)*
        }

        impl Opcode {
            pub const ALL: &'static [Opcode] = &[$(Opcode::$variant,)*];

            /// Name of the opcode in program text.
            pub fn mnemonic(&self) -> &'static str {
                match self {
                    $(Opcode::$variant => $mnemonic,)*
                }
            }

            pub fn shape(&self) -> OperandShape {
                match self {
                    $(Opcode::$variant => OperandShape::$shape,)*
                }
            }
        }
    };
}
