//! Register reference pages

use crate::page::{BitField, Block, Page, PageKind, Section};

use super::{amd_apm, intel_sdm};

pub fn pages() -> Vec<Page> {
    vec![cr0(), eflags(), general_purpose(), segment()]
}

fn register(slug: &str, title: &str, summary: &str) -> Page {
    Page::new(&format!("/registers/{}", slug), title, PageKind::Register).summary(summary)
}

fn general_purpose() -> Page {
    register(
        "general-purpose",
        "General-Purpose Registers",
        "RAX through R15 and their 32-, 16-, and 8-bit views",
    )
    .section(Section::intro(
        "x86-64 has sixteen 64-bit general-purpose registers. The first eight keep the names inherited from the 8086; R8 through R15 were added by AMD64 and are reached through the REX prefix.",
    ))
    .section(
        Section::new("layout", "Register Layout")
            .prose("Each register can be addressed at several widths. RAX, EAX, AX, AH, and AL all name parts of the same storage:")
            .block(Block::bitfield(
                64,
                vec![
                    BitField::range("RAX only", 63, 32),
                    BitField::range("EAX upper", 31, 16),
                    BitField::range("AH", 15, 8),
                    BitField::range("AL", 7, 0),
                ],
            ))
            .prose("Writing a 32-bit register zero-extends the result into the full 64-bit register. Writing an 8- or 16-bit register leaves the remaining bits unchanged."),
    )
    .section(
        Section::new("roles", "Conventional Roles").block(Block::list(&[
            "RAX: accumulator; return value; implicit operand of MUL, DIV, and CPUID.",
            "RBX: base register; callee-saved in the System V and Microsoft ABIs.",
            "RCX: count register for LOOP, REP, and shifts by CL.",
            "RDX: data register; high half of MUL and DIV results.",
            "RSI, RDI: source and destination index for string instructions.",
            "RBP: frame pointer by convention.",
            "RSP: stack pointer, used implicitly by PUSH, POP, CALL, and RET.",
            "R8 to R15: additional registers available only in 64-bit mode.",
        ])),
    )
    .section(
        Section::new("byte-registers", "Byte Registers")
            .prose("Without a REX prefix, byte register encodings 4 to 7 select AH, CH, DH, and BH. With any REX prefix the same encodings select SPL, BPL, SIL, and DIL instead, so AH cannot be used in an instruction that needs REX."),
    )
    .cite(intel_sdm())
    .cite(amd_apm())
}

fn eflags() -> Page {
    register("eflags", "EFLAGS", "Status, control, and system flags")
        .section(Section::intro(
            "The 32-bit EFLAGS register holds the status flags set by arithmetic instructions, the direction flag, and system flags that control interrupts, I/O privilege, and virtual-8086 mode. In 64-bit mode it is extended to RFLAGS with the upper 32 bits reserved.",
        ))
        .section(
            Section::new("layout", "Bit Layout").block(Block::bitfield(
                32,
                vec![
                    BitField::bit("ID", 21),
                    BitField::bit("VIP", 20),
                    BitField::bit("VIF", 19),
                    BitField::bit("AC", 18),
                    BitField::bit("VM", 17),
                    BitField::bit("RF", 16),
                    BitField::bit("NT", 14),
                    BitField::range("IOPL", 13, 12),
                    BitField::bit("OF", 11),
                    BitField::bit("DF", 10),
                    BitField::bit("IF", 9),
                    BitField::bit("TF", 8),
                    BitField::bit("SF", 7),
                    BitField::bit("ZF", 6),
                    BitField::bit("AF", 4),
                    BitField::bit("PF", 2),
                    BitField::bit("1", 1),
                    BitField::bit("CF", 0),
                ],
            )),
        )
        .section(
            Section::new("status-flags", "Status Flags").block(Block::list(&[
                "CF (bit 0): carry out of or borrow into the most significant bit.",
                "PF (bit 2): set if the low byte of the result has an even number of 1 bits.",
                "AF (bit 4): carry or borrow out of bit 3, used for BCD arithmetic.",
                "ZF (bit 6): set if the result is zero.",
                "SF (bit 7): copy of the most significant bit of the result.",
                "OF (bit 11): set if the signed result does not fit the destination.",
            ])),
        )
        .section(
            Section::new("control-flag", "Control Flag")
                .prose("DF (bit 10) controls string instructions. When clear, MOVS, CMPS, SCAS, LODS, and STOS step addresses upward; when set, downward. CLD and STD clear and set it."),
        )
        .section(
            Section::new("system-flags", "System Flags").block(Block::list(&[
                "TF (bit 8): single-step trap after each instruction.",
                "IF (bit 9): enables maskable hardware interrupts.",
                "IOPL (bits 13:12): I/O privilege level of the current task.",
                "NT (bit 14): nested task, set when a task was called through a task switch.",
                "RF (bit 16): suppresses instruction breakpoints for the next instruction.",
                "VM (bit 17): enables virtual-8086 mode.",
                "AC (bit 18): alignment check when CR0.AM is set and CPL is 3.",
                "VIF and VIP (bits 19, 20): virtual interrupt flag and pending flag.",
                "ID (bit 21): CPUID is supported if software can toggle this bit.",
            ])),
        )
        .cite(intel_sdm())
}

fn cr0() -> Page {
    register("cr0", "CR0", "Control register 0: operating mode and state")
        .section(Section::intro(
            "CR0 contains system control flags that select the operating mode and states of the processor. It is written with MOV CR0 at privilege level 0.",
        ))
        .section(
            Section::new("layout", "Bit Layout").block(Block::bitfield(
                32,
                vec![
                    BitField::bit("PG", 31),
                    BitField::bit("CD", 30),
                    BitField::bit("NW", 29),
                    BitField::bit("AM", 18),
                    BitField::bit("WP", 16),
                    BitField::bit("NE", 5),
                    BitField::bit("ET", 4),
                    BitField::bit("TS", 3),
                    BitField::bit("EM", 2),
                    BitField::bit("MP", 1),
                    BitField::bit("PE", 0),
                ],
            )),
        )
        .section(
            Section::new("flags", "Flags").block(Block::list(&[
                "PE (bit 0): protection enable; set to enter protected mode.",
                "MP (bit 1): monitor coprocessor; controls WAIT/FWAIT with TS.",
                "EM (bit 2): emulation; x87 instructions raise #NM when set.",
                "TS (bit 3): task switched; lets the OS save x87/SSE state lazily.",
                "ET (bit 4): extension type; hardwired to 1 on modern processors.",
                "NE (bit 5): numeric error; native x87 error reporting when set.",
                "WP (bit 16): write protect; supervisor writes honor read-only pages.",
                "AM (bit 18): alignment mask; enables EFLAGS.AC checking.",
                "NW (bit 29): not write-through.",
                "CD (bit 30): cache disable.",
                "PG (bit 31): paging; requires PE to be set.",
            ])),
        )
        .section(
            Section::new("mode-switching", "Mode Switching")
                .prose("Setting PE enters protected mode. Setting PG with CR4.PAE and IA32_EFER.LME set activates long mode (IA-32e mode). Clearing PG in long mode is only allowed from compatibility mode."),
        )
        .cite(intel_sdm())
}

fn segment() -> Page {
    register("segment", "Segment Registers", "CS, DS, SS, ES, FS, and GS")
        .section(Section::intro(
            "The six 16-bit segment registers hold segment selectors. Each selector identifies a descriptor whose base, limit, and access rights the processor caches in a hidden part of the register.",
        ))
        .section(
            Section::new("selector", "Selector Format")
                .block(Block::bitfield(
                    16,
                    vec![
                        BitField::range("Index", 15, 3),
                        BitField::bit("TI", 2),
                        BitField::range("RPL", 1, 0),
                    ],
                ))
                .prose("Index selects one of 8192 descriptors. TI chooses the GDT (0) or the current LDT (1). RPL is the requested privilege level."),
        )
        .section(
            Section::new("registers", "Registers").block(Block::list(&[
                "CS: code segment; loaded only by far control transfers.",
                "SS: stack segment; loading it inhibits interrupts for one instruction.",
                "DS, ES: data segments; ES is the implicit destination of string instructions.",
                "FS, GS: extra data segments; in 64-bit mode their bases come from MSRs and are used for thread-local storage.",
            ])),
        )
        .section(
            Section::new("64-bit-mode", "64-Bit Mode")
                .prose("In 64-bit mode segmentation is mostly disabled: the bases of CS, DS, ES, and SS are treated as zero and limits are not checked. FS and GS bases remain usable, and SWAPGS exchanges GS base with the IA32_KERNEL_GS_BASE MSR."),
        )
        .cite(intel_sdm())
}
