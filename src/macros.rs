//! The [`register_fields!`](crate::register_fields) definition macro.

/// Declares registers and their bit-fields.
///
/// One invocation can declare any number of registers. Each register names its
/// underlying unsigned integer type, its access mode ([`ReadOnly`],
/// [`ReadWrite`] or [`WriteOnly`](crate::access::WriteOnly)) and an ordered
/// list of fields with a bit width, a bit offset and optionally named values:
///
/// ```rust
/// use reg_fields::register_fields;
///
/// register_fields! {
///     /// Control register of an imaginary serial widget.
///     pub Control(u8, ReadWrite) {
///         /// Enables the widget.
///         Enable(width = 1, offset = 0),
///         /// Transfer direction.
///         Direction(width = 1, offset = 1),
///         /// Operating mode.
///         Mode(width = 3, offset = 2) [
///             Idle = 0,
///             Transmit = 1,
///             Receive = 2,
///             Loopback = 3,
///         ],
///     }
/// }
///
/// let on = Control::Enable::new(1).unwrap();
/// assert_eq!(on.raw_value(), 0b0000_0001);
/// assert_eq!((on + Control::Mode::Receive).raw_value(), 0b0000_1001);
/// ```
///
/// For each register the macro generates a module of the same name containing:
/// - `Register`, the [`RegisterTag`](crate::RegisterTag) marker tying the
///   register's fields to it;
/// - `Access`, an alias for the declared access-mode type;
/// - `Reg<'a>`, an alias for [`Reg`](crate::Reg) over the underlying type,
///   access mode and tag, used by `#[derive(RegBlock)]` accessors;
/// - one zero-sized descriptor struct per field, with `WIDTH`, `OFFSET` and
///   `MASK` constants, the `new` / `new_checked` constructors and one
///   [`Field`](crate::Field) constant per named value.
///
/// All masks and shifts are computed here; consumers never write one by hand.
///
/// # Build-time rejection
///
/// A field with `width` of zero, or one that does not lie inside the
/// underlying integer type, fails compilation at the definition. So does a
/// named value whose literal does not fit the field's width, through the same
/// bound check as [`Field::new_checked`](crate::Field::new_checked):
///
/// ```compile_fail
/// reg_fields::register_fields! {
///     pub Broken(u8, ReadWrite) {
///         // 6 + 4 exceeds the 8 bits of a u8
///         Wide(width = 4, offset = 6),
///     }
/// }
/// ```
///
/// Two fields with the same name collide in the generated module and fail
/// compilation. Declaring sibling fields whose bit ranges overlap is *not*
/// detected; keeping the ranges disjoint is the author's responsibility.
///
/// [`ReadOnly`]: crate::access::ReadOnly
/// [`ReadWrite`]: crate::access::ReadWrite
#[macro_export]
macro_rules! register_fields {
    ($(
        $(#[$reg_meta:meta])*
        $vis:vis $reg_name:ident($int:ty, $access:ident) {
            $(
                $(#[$field_meta:meta])*
                $field:ident(width = $width:literal, offset = $offset:literal)
                $([
                    $( $(#[$value_meta:meta])* $value:ident = $literal:literal ),+ $(,)?
                ])?
            ),+
            $(,)?
        }
    )+) => {$(
        $(#[$reg_meta])*
        #[allow(non_snake_case)]
        $vis mod $reg_name {
            /// Marker relating this register to its fields.
            pub enum Register {}

            impl $crate::RegisterTag for Register {}

            /// Access mode of this register.
            pub type Access = $crate::access::$access;

            /// Pointer to this register.
            pub type Reg<'a> = $crate::Reg<'a, $int, Access, Register>;

            $(
                $(#[$field_meta])*
                #[derive(Clone, Copy)]
                pub struct $field;

                impl $crate::FieldSpec for $field {
                    type Int = $int;
                    type Tag = Register;
                    const WIDTH: u32 = $width;
                    const OFFSET: u32 = $offset;
                }

                impl $field {
                    /// Number of bits the field occupies.
                    pub const WIDTH: u32 = $width;

                    /// Bit position of the field's least-significant bit.
                    pub const OFFSET: u32 = $offset;

                    /// Bit pattern with ones exactly at the field's positions.
                    pub const MASK: $int =
                        <$crate::Field<$int, Register, { $width }, { $offset }>>::MASK;

                    /// Builds a field value from `value`, known only at run
                    /// time. Fails when `value` does not fit the field's
                    /// width; the value is never truncated.
                    #[inline]
                    pub fn new(
                        value: $int,
                    ) -> ::core::result::Result<
                        $crate::Field<$int, Register, { $width }, { $offset }>,
                        $crate::OutOfBounds,
                    > {
                        <$crate::Field<$int, Register, { $width }, { $offset }>>::new(value)
                    }

                    /// Builds a field value from the constant `VALUE`. A
                    /// `VALUE` that does not fit the field's width fails
                    /// compilation.
                    #[inline]
                    pub const fn new_checked<const VALUE: $int>()
                    -> $crate::Field<$int, Register, { $width }, { $offset }> {
                        <$crate::Field<$int, Register, { $width }, { $offset }>>::new_checked::<VALUE>()
                    }

                    $($(
                        $(#[$value_meta])*
                        #[allow(non_upper_case_globals)]
                        pub const $value: $crate::Field<$int, Register, { $width }, { $offset }> =
                            <$crate::Field<$int, Register, { $width }, { $offset }>>::new_checked::<{ $literal }>();
                    )+)?
                }

                const _: () = <$crate::Field<$int, Register, { $width }, { $offset }>>::LAYOUT;
            )+
        }
    )+};
}
