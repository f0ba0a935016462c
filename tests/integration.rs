use reg_fields::{FieldSet, OutOfBounds, RegBlock, register_fields};

register_fields! {
    /// Status flags of the widget.
    pub Status(u8, ReadWrite) {
        On(width = 1, offset = 0),
        Dead(width = 1, offset = 1),
        Color(width = 3, offset = 2) [
            Red = 1,
            Blue = 2,
            Green = 3,
            Yellow = 4,
        ],
    }

    /// Interrupt cause, written by hardware.
    pub Cause(u16, ReadOnly) {
        Code(width = 4, offset = 0),
        Pending(width = 1, offset = 15),
    }

    /// Command strobe.
    pub Command(u32, WriteOnly) {
        Go(width = 1, offset = 0),
        Arg(width = 8, offset = 8),
    }

    /// Full-width data window.
    pub Window(u32, ReadWrite) {
        Word(width = 32, offset = 0),
    }
}

#[repr(C)]
#[derive(RegBlock, Default)]
pub struct Widget {
    #[reg(Status)]
    status: u8,
    _reserved0: u8,
    #[reg(Cause)]
    cause: u16,
    #[reg(Command)]
    command: u32,
    #[reg(Window)]
    window: u32,
}

#[repr(C)]
#[derive(RegBlock)]
struct Mixed {
    plain: u32,
    #[reg(RO)]
    id: u32,
    #[reg(WO)]
    strobe: u32,
}

#[repr(C)]
#[derive(RegBlock)]
struct Duo {
    first: u32,
    second: Inner,
}

#[repr(C)]
#[derive(RegBlock, Default)]
struct Inner {
    word: u32,
}

#[repr(C)]
#[derive(RegBlock, Default)]
struct Lanes {
    lanes: [Inner; 3],
}

#[repr(C)]
#[derive(RegBlock, Default)]
struct Outer {
    prefix: u32,
    banks: [u8; 4],
    #[reg(Status)]
    stats: [u8; 2],
    _reserved0: [u8; 2],
}

#[test]
fn field_bounds() {
    for value in 0..=7u8 {
        let field = Status::Color::new(value).unwrap();
        assert_eq!(field.raw_value(), value << 2);
        assert_eq!(field.value(), value);
    }
    assert_eq!(Status::Color::new(7).unwrap().raw_value(), 0b0001_1100);

    assert_eq!(Status::Color::new(8).unwrap_err(), OutOfBounds);
    assert_eq!(Status::Color::new(0xff).unwrap_err(), OutOfBounds);
    assert_eq!(Status::On::new(2).unwrap_err(), OutOfBounds);
}

#[test]
fn checked_constructor_and_named_values() {
    let yellow = Status::Color::new_checked::<4>();
    assert_eq!(yellow.raw_value(), 0b0001_0000);

    assert_eq!(Status::Color::Red.raw_value(), 0b0000_0100);
    assert_eq!(Status::Color::Blue.raw_value(), 0b0000_1000);
    assert_eq!(Status::Color::Green.raw_value(), 0b0000_1100);
    assert_eq!(Status::Color::Yellow.raw_value(), 0b0001_0000);

    assert_eq!(Status::On::MASK, 0b0000_0001);
    assert_eq!(Status::Dead::MASK, 0b0000_0010);
    assert_eq!(Status::Color::MASK, 0b0001_1100);
    assert_eq!(Status::Color::WIDTH, 3);
    assert_eq!(Status::Color::OFFSET, 2);
}

#[test]
fn modify_composed_fields() {
    let mut regs = Widget::default();
    let ptr = WidgetPtr::from_mut(&mut regs);

    ptr.status().modify(Status::On::new(1).unwrap() + Status::Color::Red);
    assert_eq!(ptr.status().read(), 0b0000_0101);

    ptr.status().modify(Status::Dead::new(1).unwrap());
    assert_eq!(ptr.status().read(), 0b0000_0111);

    assert_eq!(regs.status, 0b0000_0111);
}

#[test]
fn modify_preserves_unrelated_bits() {
    let mut regs = Widget {
        status: 0b1110_0011,
        ..Default::default()
    };
    let ptr = WidgetPtr::from_mut(&mut regs);

    ptr.status().modify(Status::Color::Blue);
    assert_eq!(ptr.status().read(), 0b1110_1011);

    ptr.status()
        .modify(Status::On::new(0).unwrap() + Status::Color::new(0).unwrap());
    assert_eq!(ptr.status().read(), 0b1110_0010);
}

#[test]
fn composition_is_commutative_and_associative() {
    let a = Status::On::new(1).unwrap();
    let b = Status::Color::Green;
    let c = Status::Dead::new(1).unwrap();

    let ab = a + b;
    let ba = b + a;
    assert_eq!(ab.mask(), ba.mask());
    assert_eq!(ab.raw_value(), ba.raw_value());

    let ab_c = (a + b) + c;
    let a_bc = a + (b + c);
    assert_eq!(ab_c.mask(), a_bc.mask());
    assert_eq!(ab_c.raw_value(), a_bc.raw_value());
    assert_eq!(ab_c.mask(), 0b0001_1111);
    assert_eq!(ab_c.raw_value(), 0b0000_1111);
}

#[test]
fn empty_set_is_identity() {
    let set = FieldSet::empty() + Status::Dead::new(1).unwrap();
    assert_eq!(set.mask(), Status::Dead::MASK);
    assert_eq!(set.raw_value(), 0b0000_0010);

    let mut regs = Widget {
        status: 0b0101_0101,
        ..Default::default()
    };
    let ptr = WidgetPtr::from_mut(&mut regs);
    ptr.status().modify(FieldSet::empty());
    assert_eq!(ptr.status().read(), 0b0101_0101);
}

#[test]
fn get_field_after_write() {
    let mut regs = Widget::default();
    let ptr = WidgetPtr::from_mut(&mut regs);

    ptr.status().write(0b0101_1110);
    assert_eq!(ptr.status().get_field(Status::On), Some(0));
    assert_eq!(ptr.status().get_field(Status::Dead), Some(1));
    assert_eq!(ptr.status().get_field(Status::Color), Some(0b111));
}

#[test]
fn read_only_register() {
    let mut regs = Widget {
        cause: 0x8003,
        ..Default::default()
    };
    let ptr = WidgetPtr::from_mut(&mut regs);

    assert_eq!(ptr.cause().read(), 0x8003);
    assert_eq!(ptr.cause().get_field(Cause::Code), Some(3));
    assert_eq!(ptr.cause().get_field(Cause::Pending), Some(1));

    assert!(ptr.cause().any_set(Cause::Code::MASK));
    assert!(!ptr.cause().all_set(Cause::Code::MASK));
    assert!(ptr.cause().all_set(Cause::Pending::MASK));

    assert_eq!(regs.cause, 0x8003);
}

#[test]
fn write_only_register() {
    let mut regs = Widget::default();
    let ptr = WidgetPtr::from_mut(&mut regs);

    let cmd = Command::Go::new(1).unwrap() + Command::Arg::new(0x15).unwrap();
    ptr.command().write(cmd.raw_value());

    assert_eq!(regs.command, 0x0000_1501);
}

#[test]
fn full_width_field() {
    assert_eq!(Window::Word::MASK, u32::MAX);
    assert_eq!(Window::Word::new(u32::MAX).unwrap().raw_value(), u32::MAX);

    let mut regs = Widget::default();
    let ptr = WidgetPtr::from_mut(&mut regs);
    ptr.window().modify(Window::Word::new(0xdead_beef).unwrap());
    assert_eq!(ptr.window().read(), 0xdead_beef);
    assert_eq!(ptr.window().get_field(Window::Word), Some(0xdead_beef));

    assert_eq!(regs.window, 0xdead_beef);
}

#[test]
fn plain_registers() {
    let mut regs = Mixed {
        plain: 0,
        id: 0x1234_5678,
        strobe: 0,
    };
    let ptr = MixedPtr::from_mut(&mut regs);

    ptr.plain().write(42);
    assert_eq!(ptr.plain().read(), 42);
    assert_eq!(ptr.id().read(), 0x1234_5678);
    ptr.strobe().write(1);

    assert_eq!(regs.plain, 42);
    assert_eq!(regs.id, 0x1234_5678);
    assert_eq!(regs.strobe, 1);
}

#[test]
fn register_arrays() {
    let mut regs = Outer::default();
    let ptr = OuterPtr::from_mut(&mut regs);

    ptr.prefix().write(7);

    assert_eq!(ptr.banks().len(), 4);
    for (i, reg) in ptr.banks().iter().enumerate() {
        reg.write(i as u8 * 3);
    }
    for i in 0..ptr.banks().len() {
        assert_eq!(ptr.banks().idx(i).read(), i as u8 * 3);
    }

    assert_eq!(regs.prefix, 7);
    assert_eq!(regs.banks, [0, 3, 6, 9]);
}

#[test]
fn array_of_field_registers() {
    let mut regs = Outer::default();
    let ptr = OuterPtr::from_mut(&mut regs);

    ptr.stats().idx(0).modify(Status::Color::Yellow);
    ptr.stats().idx(1).modify(Status::On::new(1).unwrap());

    assert_eq!(regs.stats, [0b0001_0000, 0b0000_0001]);
}

#[test]
fn nested_blocks() {
    let mut regs = Duo {
        first: 1,
        second: Inner { word: 2 },
    };
    let ptr = DuoPtr::from_mut(&mut regs);

    assert_eq!(ptr.first().read(), 1);
    assert_eq!(ptr.second().word().read(), 2);

    ptr.second().word().write(20);
    assert_eq!(ptr.second().word().read(), 20);

    assert_eq!(regs.first, 1);
    assert_eq!(regs.second.word, 20);
}

#[test]
fn array_of_blocks() {
    let mut regs = Lanes::default();
    let ptr = LanesPtr::from_mut(&mut regs);

    for (i, lane) in ptr.lanes().iter().enumerate() {
        lane.word().write(i as u32 + 10);
    }
    for i in 0..ptr.lanes().len() {
        assert_eq!(ptr.lanes().idx(i).word().read(), i as u32 + 10);
    }

    assert_eq!(regs.lanes[0].word, 10);
    assert_eq!(regs.lanes[1].word, 11);
    assert_eq!(regs.lanes[2].word, 12);
}

#[test]
#[should_panic]
fn array_index_out_of_bounds() {
    let mut regs = Outer::default();
    let ptr = OuterPtr::from_mut(&mut regs);
    ptr.banks().idx(4);
}

#[test]
fn out_of_bounds_error() {
    let err = Status::Color::new(8).unwrap_err();
    assert_eq!(err.to_string(), "value does not fit in the field's bit width");
}

#[test]
fn leak() {
    let ptr = {
        let regs = Box::new(Widget::default());
        let ptr = WidgetPtr::from_mut(Box::leak(regs));
        ptr.window().write(2);
        ptr
    };
    assert_eq!(ptr.window().read(), 2);

    let regs = unsafe {
        let raw = ptr.as_ptr();
        #[allow(clippy::drop_non_drop)]
        drop(ptr);
        Box::from_raw(raw)
    };
    drop(regs);
}
