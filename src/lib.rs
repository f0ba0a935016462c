//! Type-checked bit-fields over memory-mapped registers, with volatile accesses.
//!
//! Hardware registers are fixed-width integers carved into named bit-fields.
//! This crate lets you declare those fields once, with their width and offset,
//! and then read, write and update them without ever writing a mask or shift
//! by hand, and without being able to write a value that does not fit its
//! field. There are two entry points:
//!
//! - the [`register_fields!`] macro declares a register's underlying integer
//!   type, access mode and bit-fields, and generates the typed field API;
//! - the derive macro [`RegBlock`] takes a `struct` laying out a block of
//!   registers in memory order and generates a pointer type with volatile
//!   accessors for each of them.
//!
//! **Table of contents**
//! - [Basic usage](#basic-usage)
//! - [Field values and bounds](#field-values-and-bounds)
//! - [Composing field writes](#composing-field-writes)
//! - [Build-time rejection](#build-time-rejection)
//! - [Access permissions](#access-permissions)
//! - [Register blocks](#register-blocks)
//! - [Thread safety](#thread-safety)
//! - [Crate features](#crate-features)
//! - [Principle of operation](#principle-of-operation)
//! - [Comparison with other crates](#comparison-with-other-crates)
//!
//! # Basic usage
//!
//! ```rust
//! # mod widget {
//! # use reg_fields::{RegBlock, register_fields};
//! // declare the register's bit-fields
//! register_fields! {
//!     /// Status flags of the widget.
//!     pub Status(u8, ReadWrite) {
//!         On(width = 1, offset = 0),
//!         Dead(width = 1, offset = 1),
//!         Color(width = 3, offset = 2) [
//!             Red = 1,
//!             Blue = 2,
//!             Green = 3,
//!             Yellow = 4,
//!         ],
//!     }
//! }
//!
//! // lay out the register block in memory order
//! // and derive the pointer StatusBlockPtr with the RegBlock macro
//! #[repr(C)]
//! #[derive(RegBlock, Default)]
//! # pub
//! struct StatusBlock {
//!     #[reg(Status)]
//!     status: u8,
//! }
//! # } // mod widget
//! # use widget::{Status, StatusBlock, StatusBlockPtr};
//!
//! // initialize the base struct and obtain a pointer to the registers;
//! // when dealing with memory-mapped IO (MMIO) you'd instead get the pointer
//! // from a known base address:
//! // let ptr = unsafe { StatusBlockPtr::from_ptr(0xAA55_0000 as *mut _) };
//! let mut regs = StatusBlock::default();
//! let ptr = StatusBlockPtr::from_mut(&mut regs);
//!
//! // update some fields, leaving every other bit untouched
//! ptr.status().modify(Status::On::new(1).unwrap() + Status::Color::Red);
//! assert_eq!(ptr.status().read(), 0b0000_0101);
//!
//! // a later modify preserves On and Color
//! ptr.status().modify(Status::Dead::new(1).unwrap());
//! assert_eq!(ptr.status().read(), 0b0000_0111);
//!
//! // read fields back out, shifted down to bit zero
//! assert_eq!(ptr.status().get_field(Status::Color), Some(1));
//! assert!(ptr.status().any_set(Status::On::MASK));
//! ```
//!
//! # Field values and bounds
//!
//! Every field value is checked against the field's bit width before it
//! exists. There are two constructor paths, applying the identical bound:
//!
//! - [`new`](Field::new) takes a value known only at run time and returns
//!   `Result<Field, OutOfBounds>`. An oversized value is reported, never
//!   truncated.
//! - [`new_checked`](Field::new_checked) takes the value as a constant and
//!   performs the comparison during compilation; an oversized constant fails
//!   the build, so no fallible return type is needed.
//!
//! ```rust
//! # mod yoo {
//! # use reg_fields::register_fields;
//! register_fields! {
//!     # pub
//!     Status(u8, ReadWrite) {
//!         Color(width = 3, offset = 2),
//!     }
//! }
//! # } // mod yoo
//! # use yoo::Status;
//! // three bits hold 0..=7
//! assert_eq!(Status::Color::new(7).unwrap().raw_value(), 0b0001_1100);
//! assert!(Status::Color::new(8).is_err());
//!
//! // same bound, checked during compilation
//! let blue = Status::Color::new_checked::<2>();
//! assert_eq!(blue.raw_value(), 0b0000_1000);
//! ```
//!
//! The same constant path constructs the named values of a field, so a typo
//! like `Yellow = 12` in a three-bit field is caught when the definition is
//! compiled, before any consumer code exists.
//!
//! # Composing field writes
//!
//! Distinct fields of one register combine with `+` into a [`FieldSet`], one
//! write-mask/write-value pair:
//! [`modify`](Reg::modify) then performs a single volatile read, merges the
//! set into the value read and performs a single volatile write. Composition
//! ORs masks and values, so it is associative and commutative, and
//! [`FieldSet::empty`] is its identity. Fields of different registers do not
//! compose; their tags differ, and the expression is rejected during
//! compilation.
//!
//! # Build-time rejection
//!
//! An out-of-range constant does not produce a buildable artifact:
//!
//! ```compile_fail
//! # mod yoo {
//! # use reg_fields::register_fields;
//! register_fields! {
//!     pub Status(u8, ReadWrite) {
//!         Color(width = 3, offset = 2),
//!     }
//! }
//! # } // mod yoo
//! # use yoo::Status;
//! // error: evaluation panicked: value does not fit in the field
//! let too_big = Status::Color::new_checked::<8>();
//! ```
//!
//! Neither does a named value that exceeds its field's width:
//!
//! ```compile_fail
//! reg_fields::register_fields! {
//!     pub Status(u8, ReadWrite) {
//!         Color(width = 3, offset = 2) [
//!             Ultraviolet = 9,
//!         ],
//!     }
//! }
//! ```
//!
//! Nor a field that does not lie inside its register (see
//! [`register_fields!`]), nor a field value used with a register it does not
//! belong to:
//!
//! ```compile_fail,E0277
//! # mod yoo {
//! # use reg_fields::{RegBlock, register_fields};
//! register_fields! {
//!     pub Status(u8, ReadWrite) {
//!         On(width = 1, offset = 0),
//!     }
//!     pub Control(u8, ReadWrite) {
//!         Enable(width = 1, offset = 0),
//!     }
//! }
//! # #[repr(C)]
//! # #[derive(RegBlock, Default)]
//! # pub struct Block {
//! #     #[reg(Status)]
//! #     status: u8,
//! # }
//! # } // mod yoo
//! # use yoo::{Block, BlockPtr, Control};
//! # let mut regs = Block::default();
//! # let ptr = BlockPtr::from_mut(&mut regs);
//! // Enable belongs to Control, not to Status
//! ptr.status().modify(Control::Enable::new(1).unwrap());
//! ```
//!
//! # Access permissions
//!
//! A register's access mode is part of its type: [`ReadOnly`](access::ReadOnly),
//! [`WriteOnly`](access::WriteOnly) or [`ReadWrite`](access::ReadWrite). It is
//! declared in [`register_fields!`], or with the `#[reg()]` attribute for
//! plain registers in a block definition (`#[reg(RO)]`, `#[reg(WO)]`,
//! `#[reg(RW)]`; read-write is the default). The permission is checked during
//! compilation: [`write`](Reg::write) is simply not defined for a read-only
//! register, [`read`](Reg::read) not for a write-only one, and
//! [`modify`](Reg::modify) needs both. The following code does not compile:
//!
//! ```compile_fail,E0277
//! # mod yoo {
//! # use reg_fields::RegBlock;
//! # #[repr(C)]
//! # #[derive(RegBlock, Default)]
//! # pub struct Registers {
//! #     #[reg(RO)]
//! #     read_only_register: u8,
//! #     #[reg(WO)]
//! #     write_only_register: u32,
//! # }
//! # } // mod yoo
//! # use yoo::{Registers, RegistersPtr};
//! # let mut regs = Registers::default();
//! # let ptr = RegistersPtr::from_mut(&mut regs);
//! ptr.read_only_register().write(54); // error[E0277]: cannot write to a read-only register
//! ptr.write_only_register().read();   // error[E0277]: cannot read from a write-only register
//! ```
//!
//! # Register blocks
//!
//! The derive macro [`RegBlock`] requires the block `struct` to have the `C`
//! representation using the `#[repr(C)]` attribute, so the declared field
//! order is the memory order. Blocks can contain:
//!
//! - plain integer registers (`u8`, `u16`, `u32`, `u64`, `u128`; signed and
//!   pointer-sized types are rejected),
//! - registers with fields, linked with `#[reg(Name)]` to a
//!   [`register_fields!`] module whose underlying type must match the struct
//!   field's type,
//! - nested blocks (another `#[derive(RegBlock)]` struct),
//! - one-dimensional arrays of registers or of nested blocks, accessed
//!   through [`RegArray`],
//! - reserved padding: a field whose name starts with `_` takes up layout
//!   space but gets no accessor.
//!
//! ```rust
//! # mod yoo {
//! # use reg_fields::RegBlock;
//! #[repr(C)]
//! #[derive(RegBlock, Default)]
//! # pub
//! struct Uart {
//!     data: u32,
//!     #[reg(RO)]
//!     state: u32,
//!     _reserved0: [u32; 2],
//!     scratch: [u32; 4],
//! }
//! # } // mod yoo
//! # use yoo::{Uart, UartPtr};
//! let mut regs = Uart::default();
//! let ptr = UartPtr::from_mut(&mut regs);
//!
//! ptr.data().write(0xb0);
//! for (i, reg) in ptr.scratch().iter().enumerate() {
//!     reg.write(i as u32);
//! }
//! assert_eq!(ptr.scratch().idx(2).read(), 2);
//! ```
//!
//! # Thread safety
//!
//! All reads and writes performed through the pointers derived by [`RegBlock`]
//! are volatile. However in Rust, *"just like in C, whether an operation is
//! volatile has no bearing whatsoever on questions involving concurrent access
//! from multiple threads. Volatile accesses behave exactly like non-atomic
//! accesses in that regard."* See safety docs for
//! [`read_volatile`](core::ptr::read_volatile#safety) and
//! [`write_volatile`](core::ptr::write_volatile#safety).
//!
//! In particular, [`modify`](Reg::modify) is a read followed by a write, not
//! an atomic unit: if an interrupt handler or another core writes the register
//! between the two, that update is lost. This crate provides no locking; mask
//! interrupts or take a lock around the access if you need exclusion.
//!
//! There is currently no way in Rust to define memory accesses as both
//! volatile and atomic, so the pointers derived by [`RegBlock`] implement
//! neither [`Send`] nor [`Sync`]. If you know that volatile and relaxed atomic
//! accesses coincide on your platform and for your use case, you can `unsafe`ly
//! implement `Send` and `Sync` for your pointer type yourself; if something
//! goes wrong, that's on you. See
//! [URLO: Volatile + relaxed atomic load/store](https://users.rust-lang.org/t/volatile-relaxed-atomic-load-store/92792).
//!
//! # Crate features
//!
//! By default, no features are enabled. These features exist:
//!
//! - **std** -
//!   When enabled, this will cause `reg-fields` to use the standard library.
//!   Currently, this feature is only used as a dependency of other features.
//!
//! - **debug-trace** -
//!   When enabled, all register reads and writes print a debug trace to
//!   standard error. Depends on feature `std`. For example, the code
//!   ```ignore
//!   ptr.data().write(0xb0);
//!   ptr.data().read();
//!   ```
//!   might print something like
//!   ```text
//!   REG-FIELDS WRITE 0x7ffc30c85c70 176
//!   REG-FIELDS READ  0x7ffc30c85c70 176
//!   ```
//!   Note that this feature only works on targets that support `std`, and that
//!   printing to standard error for every register access might heavily impact
//!   performance.
//!
//! # Principle of operation
//!
//! The derive macro [`RegBlock`] takes the definition of a register block (a
//! `struct`) and generates a custom pointer type wrapping a raw pointer to the
//! original `struct`. The accessor methods use
//! [`addr_of_mut!`](core::ptr::addr_of_mut) on that raw pointer to reach each
//! register, so no reference to the volatile memory is ever created; every
//! access goes through [`read_volatile`](core::ptr::read_volatile) /
//! [`write_volatile`](core::ptr::write_volatile) on a raw pointer. Avoiding
//! references to volatile memory is important for soundness, as discussed in
//! [rust-lang/unsafe-code-guidelines#33](https://github.com/rust-lang/unsafe-code-guidelines/issues/33)
//! and
//! [rust-lang/unsafe-code-guidelines#411](https://github.com/rust-lang/unsafe-code-guidelines/issues/411).
//!
//! The field layer is purely computational. A field's width and offset are
//! const generic parameters of [`Field`]; its mask and bound are associated
//! constants computed from them, and the bound comparisons run either in
//! const evaluation ([`new_checked`](Field::new_checked), named values, the
//! layout assertions) or at run time ([`new`](Field::new)). At run time a
//! `Field` is nothing but the already-shifted value; a [`FieldSet`] is the
//! mask/value pair; descriptors are zero-sized.
//!
//! # Comparison with other crates
//!
//! The register/field model follows the same shape as
//! [tock-registers](https://lib.rs/crates/tock-registers): registers divided
//! into fields, field values composed with `+`, a `modify` that preserves
//! unrelated bits. The main differences: field bounds here are checked (at
//! build time for constants, fallibly at run time otherwise) instead of
//! silently masked, and block pointers never materialize references to the
//! underlying memory, following the approach of
//! [volatile](https://lib.rs/crates/volatile) rather than wrapping the
//! registers in cell types.

#![no_std]

#[cfg(feature = "std")]
extern crate std;

/// Derive macro to generate a pointer to a register block with volatile reads
/// and writes.
///
/// See the [top-level documentation](crate) for usage information and examples.
pub use reg_fields_derive::RegBlock;

pub mod access;

mod arr;
pub use arr::{ArrayElem, RegArray, RegArrayIter};

mod fields;
pub use fields::{Field, FieldSet, FieldSpec, OutOfBounds};

pub mod integers;

mod macros;

mod reg;
pub use reg::{Reg, RegBlockPtr, RegisterTag};
