use nes6502::{Bus, Console, ConsoleConfig, CpuError, NesBus, NtscTiming, TraceConfig};

/// Demo program: add in a loop and count X up until it wraps, then spin.
/// The NMI handler counts vertical blanks in $0010.
fn build_program() -> Result<NesBus, CpuError> {
    let program: &[u8] = &[
        0xA9, 0x10, // $8000 LDA #$10
        0x69, 0x05, // $8002 ADC #$05 => A = 0x15
        0x8D, 0x00, 0x02, // $8004 STA $0200
        0xE8, // $8007 INX
        0xD0, 0xFD, // $8008 BNE -3 -> loop until X wraps to 0
        0x4C, 0x0A, 0x80, // $800A JMP $800A
        0xE6, 0x10, // $800D INC $10 (NMI handler)
        0x40, // $800F RTI
    ];
    let mut bus = NesBus::with_program(program)?;
    bus.set_vectors(0x8000, 0x800D, 0x800A);
    Ok(bus)
}

fn main() -> Result<(), CpuError> {
    env_logger::init();

    let trace = std::env::args().any(|a| a == "--trace");
    let config = ConsoleConfig {
        trace: if trace { TraceConfig::enabled() } else { TraceConfig::default() },
        ..ConsoleConfig::default()
    };

    let mut console = Console::new(build_program()?, NtscTiming::with_vblank_nmi(), config);
    console.power_on()?;

    // Two frames so the vertical-blank handler runs at least once.
    for frame in 0..2 {
        let stats = console.run_frame()?;
        println!(
            "frame {frame}: {} steps, {} cycles{}",
            stats.steps,
            stats.cycles,
            if stats.completed { "" } else { " (incomplete)" }
        );
    }

    let m0200 = console.bus_mut().get(0x0200)?;
    let vblanks = console.bus_mut().get(0x0010)?;
    let cpu = console.cpu();
    println!("A: 0x{:02X}", cpu.a());
    println!("X: 0x{:02X}", cpu.x());
    println!("Y: 0x{:02X}", cpu.y());
    println!("SP: 0x{:02X}", cpu.sp());
    println!("P: 0x{:02X}", cpu.status());
    println!("PC: 0x{:04X}", cpu.pc());
    println!("CYC: {}", cpu.cycles());
    println!("MEM[$0200]: 0x{m0200:02X}");
    println!("vblank NMIs: {vblanks}");
    if trace {
        println!("last trace: {}", console.recorder().last().unwrap_or("<none>"));
    }
    Ok(())
}
