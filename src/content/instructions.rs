//! Instruction reference pages

use crate::page::{
    flags, BitField, Block, ExceptionRow, FlagEffect, OpcodeRow, OperandEncodingRow, Page, PageKind,
    Section, Validity,
};

use super::{amd_apm, intel_sdm};

use FlagEffect::Modified;
use Validity::{Invalid, NotEncodable as NE, NotSupported as NS, Valid};

pub fn pages() -> Vec<Page> {
    vec![
        add(),
        call(),
        cmp(),
        cpuid(),
        jmp(),
        lea(),
        mov(),
        nop(),
        pop(),
        push(),
        sub(),
        xchg(),
    ]
}

fn op(opcode: &str, instruction: &str, op_en: &str, m64: Validity, compat: Validity, desc: &str) -> OpcodeRow {
    OpcodeRow::new(opcode, instruction, op_en, m64, compat, desc)
}

fn enc(op_en: &str, operands: &[&str]) -> OperandEncodingRow {
    OperandEncodingRow::new(op_en, operands)
}

fn exc(exception: &str, condition: &str) -> ExceptionRow {
    ExceptionRow::new(exception, condition)
}

fn instruction(mnemonic: &str, summary: &str) -> Page {
    Page::new(
        &format!("/instructions/{}", mnemonic.to_lowercase()),
        mnemonic,
        PageKind::Instruction,
    )
    .summary(summary)
}

fn encoding(opcodes: Vec<OpcodeRow>, operands: Vec<OperandEncodingRow>) -> Section {
    Section::new("encoding", "Encoding")
        .block(Block::OpcodeTable { rows: opcodes })
        .subsection(
            Section::new("operand-encoding", "Operand Encoding")
                .block(Block::OperandEncoding { rows: operands }),
        )
}

fn no_flags() -> Section {
    Section::new("flags", "Flags Affected").prose("None.")
}

fn arithmetic_flags() -> Section {
    Section::new("flags", "Flags Affected")
        .prose("The OF, SF, ZF, AF, CF, and PF flags are set according to the result.")
        .block(flags(&[
            ("OF", Modified),
            ("SF", Modified),
            ("ZF", Modified),
            ("AF", Modified),
            ("CF", Modified),
            ("PF", Modified),
        ]))
}

/// Exception sections shared by instructions with a plain memory operand
fn memory_exceptions(writes: bool) -> Section {
    let mut protected = Vec::new();
    if writes {
        protected.push(exc("#GP(0)", "If the destination operand is located in a non-writable segment."));
    }
    protected.extend([
        exc("#GP(0)", "If a memory operand effective address is outside the CS, DS, ES, FS, or GS segment limit."),
        exc("#GP(0)", "If the DS, ES, FS, or GS register contains a NULL segment selector."),
        exc("#SS(0)", "If a memory operand effective address is outside the SS segment limit."),
        exc("#PF(fault-code)", "If a page fault occurs."),
        exc("#AC(0)", "If alignment checking is enabled and an unaligned memory reference is made while the current privilege level is 3."),
    ]);

    Section::new("exceptions", "Exceptions")
        .subsection(
            Section::new("protected-mode", "Protected Mode")
                .block(Block::exceptions("Protected Mode", protected)),
        )
        .subsection(
            Section::new("real-mode", "Real-Address Mode").block(Block::exceptions(
                "Real-Address Mode",
                vec![
                    exc("#GP", "If a memory operand effective address is outside the CS, DS, ES, FS, or GS segment limit."),
                    exc("#SS", "If a memory operand effective address is outside the SS segment limit."),
                ],
            )),
        )
        .subsection(
            Section::new("64-bit-mode", "64-Bit Mode").block(Block::exceptions(
                "64-Bit Mode",
                vec![
                    exc("#SS(0)", "If a memory address referencing the SS segment is in a non-canonical form."),
                    exc("#GP(0)", "If the memory address is in a non-canonical form."),
                    exc("#PF(fault-code)", "If a page fault occurs."),
                    exc("#AC(0)", "If alignment checking is enabled and an unaligned memory reference is made while the current privilege level is 3."),
                ],
            )),
        )
}

fn lock_only_exceptions() -> Section {
    Section::new("exceptions", "Exceptions").block(Block::exceptions(
        "All Modes",
        vec![exc("#UD", "If the LOCK prefix is used.")],
    ))
}

fn mov() -> Page {
    instruction("MOV", "Move data between registers, memory, and immediates")
        .section(Section::intro(
            "Copies the second operand (source) to the first operand (destination). Both operands must be the same size, and a memory-to-memory move is not encodable.",
        ))
        .section(encoding(
            vec![
                op("88 /r", "MOV r/m8, r8", "MR", Valid, Valid, "Move r8 to r/m8."),
                op("89 /r", "MOV r/m32, r32", "MR", Valid, Valid, "Move r32 to r/m32."),
                op("REX.W + 89 /r", "MOV r/m64, r64", "MR", Valid, NE, "Move r64 to r/m64."),
                op("8A /r", "MOV r8, r/m8", "RM", Valid, Valid, "Move r/m8 to r8."),
                op("8B /r", "MOV r32, r/m32", "RM", Valid, Valid, "Move r/m32 to r32."),
                op("REX.W + 8B /r", "MOV r64, r/m64", "RM", Valid, NE, "Move r/m64 to r64."),
                op("8C /r", "MOV r/m16, Sreg", "MR", Valid, Valid, "Move segment register to r/m16."),
                op("8E /r", "MOV Sreg, r/m16", "RM", Valid, Valid, "Move r/m16 to segment register."),
                op("B8+ rd id", "MOV r32, imm32", "OI", Valid, Valid, "Move imm32 to r32."),
                op("REX.W + B8+ rd io", "MOV r64, imm64", "OI", Valid, NE, "Move imm64 to r64."),
                op("C7 /0 id", "MOV r/m32, imm32", "MI", Valid, Valid, "Move imm32 to r/m32."),
            ],
            vec![
                enc("MR", &["ModRM:r/m (w)", "ModRM:reg (r)"]),
                enc("RM", &["ModRM:reg (w)", "ModRM:r/m (r)"]),
                enc("OI", &["opcode + rd (w)", "imm8/16/32/64"]),
                enc("MI", &["ModRM:r/m (w)", "imm8/16/32/64"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("The destination can be a general-purpose register, segment register, or memory location. The source can be an immediate, a general-purpose register, a segment register, or a memory location.")
                .prose("Loading the SS register with MOV inhibits interrupts until after the next instruction executes, so a following MOV to ESP completes before any interrupt is taken. CS cannot be loaded with MOV; an attempt raises #UD.")
                .prose("In 64-bit mode a 32-bit destination register is zero-extended to 64 bits.")
                .block(Block::code("mov eax, 10        ; immediate to register\nmov ebx, eax       ; register to register\nmov [rdi], rax     ; register to memory\nmov ds, ax         ; load a segment register")),
        )
        .section(no_flags())
        .section(memory_exceptions(true))
        .cite(intel_sdm())
}

fn add() -> Page {
    instruction("ADD", "Integer addition")
        .section(Section::intro(
            "Adds the destination operand and the source operand and stores the result in the destination operand.",
        ))
        .section(encoding(
            vec![
                op("04 ib", "ADD AL, imm8", "I", Valid, Valid, "Add imm8 to AL."),
                op("05 id", "ADD EAX, imm32", "I", Valid, Valid, "Add imm32 to EAX."),
                op("REX.W + 05 id", "ADD RAX, imm32", "I", Valid, NE, "Add imm32 sign-extended to 64 bits to RAX."),
                op("80 /0 ib", "ADD r/m8, imm8", "MI", Valid, Valid, "Add imm8 to r/m8."),
                op("81 /0 id", "ADD r/m32, imm32", "MI", Valid, Valid, "Add imm32 to r/m32."),
                op("83 /0 ib", "ADD r/m32, imm8", "MI", Valid, Valid, "Add sign-extended imm8 to r/m32."),
                op("00 /r", "ADD r/m8, r8", "MR", Valid, Valid, "Add r8 to r/m8."),
                op("01 /r", "ADD r/m32, r32", "MR", Valid, Valid, "Add r32 to r/m32."),
                op("02 /r", "ADD r8, r/m8", "RM", Valid, Valid, "Add r/m8 to r8."),
                op("03 /r", "ADD r32, r/m32", "RM", Valid, Valid, "Add r/m32 to r32."),
            ],
            vec![
                enc("RM", &["ModRM:reg (r, w)", "ModRM:r/m (r)"]),
                enc("MR", &["ModRM:r/m (r, w)", "ModRM:reg (r)"]),
                enc("MI", &["ModRM:r/m (r, w)", "imm8/16/32"]),
                enc("I", &["AL/AX/EAX/RAX", "imm8/16/32"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("The destination can be a register or a memory location; the source can be an immediate, a register, or a memory location. Two memory operands cannot be used in one instruction. An immediate is sign-extended to the length of the destination.")
                .prose("ADD performs integer addition without distinguishing signed from unsigned operands. It sets OF to report signed overflow and CF to report unsigned carry out; SF gives the sign of a signed result.")
                .prose("With the LOCK prefix and a memory destination the addition is atomic."),
        )
        .section(arithmetic_flags())
        .section(memory_exceptions(true))
        .cite(intel_sdm())
}

fn sub() -> Page {
    instruction("SUB", "Integer subtraction")
        .section(Section::intro(
            "Subtracts the source operand from the destination operand and stores the result in the destination operand.",
        ))
        .section(encoding(
            vec![
                op("2C ib", "SUB AL, imm8", "I", Valid, Valid, "Subtract imm8 from AL."),
                op("2D id", "SUB EAX, imm32", "I", Valid, Valid, "Subtract imm32 from EAX."),
                op("REX.W + 2D id", "SUB RAX, imm32", "I", Valid, NE, "Subtract imm32 sign-extended to 64 bits from RAX."),
                op("80 /5 ib", "SUB r/m8, imm8", "MI", Valid, Valid, "Subtract imm8 from r/m8."),
                op("81 /5 id", "SUB r/m32, imm32", "MI", Valid, Valid, "Subtract imm32 from r/m32."),
                op("83 /5 ib", "SUB r/m32, imm8", "MI", Valid, Valid, "Subtract sign-extended imm8 from r/m32."),
                op("28 /r", "SUB r/m8, r8", "MR", Valid, Valid, "Subtract r8 from r/m8."),
                op("29 /r", "SUB r/m32, r32", "MR", Valid, Valid, "Subtract r32 from r/m32."),
                op("2A /r", "SUB r8, r/m8", "RM", Valid, Valid, "Subtract r/m8 from r8."),
                op("2B /r", "SUB r32, r/m32", "RM", Valid, Valid, "Subtract r/m32 from r32."),
            ],
            vec![
                enc("I", &["AL/AX/EAX/RAX", "imm8/16/32"]),
                enc("MI", &["ModRM:r/m (r, w)", "imm8/16/32"]),
                enc("MR", &["ModRM:r/m (r, w)", "ModRM:reg (r)"]),
                enc("RM", &["ModRM:reg (r, w)", "ModRM:r/m (r)"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("SUB evaluates the result for both signed and unsigned integer operands. CF reports a borrow for unsigned operands and OF reports overflow for signed operands.")
                .block(Block::code("sub rsp, 40        ; reserve shadow space and align the stack\nsub eax, [rbx]")),
        )
        .section(arithmetic_flags())
        .section(memory_exceptions(true))
        .cite(intel_sdm())
}

fn cmp() -> Page {
    instruction("CMP", "Compare two operands")
        .section(Section::intro(
            "Compares the first source operand with the second source operand and sets the status flags in EFLAGS according to the results.",
        ))
        .section(encoding(
            vec![
                op("3C ib", "CMP AL, imm8", "I", Valid, Valid, "Compare imm8 with AL."),
                op("3D id", "CMP EAX, imm32", "I", Valid, Valid, "Compare imm32 with EAX."),
                op("80 /7 ib", "CMP r/m8, imm8", "MI", Valid, Valid, "Compare imm8 with r/m8."),
                op("81 /7 id", "CMP r/m32, imm32", "MI", Valid, Valid, "Compare imm32 with r/m32."),
                op("83 /7 ib", "CMP r/m32, imm8", "MI", Valid, Valid, "Compare sign-extended imm8 with r/m32."),
                op("38 /r", "CMP r/m8, r8", "MR", Valid, Valid, "Compare r8 with r/m8."),
                op("39 /r", "CMP r/m32, r32", "MR", Valid, Valid, "Compare r32 with r/m32."),
                op("3A /r", "CMP r8, r/m8", "RM", Valid, Valid, "Compare r/m8 with r8."),
                op("3B /r", "CMP r32, r/m32", "RM", Valid, Valid, "Compare r/m32 with r32."),
            ],
            vec![
                enc("RM", &["ModRM:reg (r)", "ModRM:r/m (r)"]),
                enc("MR", &["ModRM:r/m (r)", "ModRM:reg (r)"]),
                enc("MI", &["ModRM:r/m (r)", "imm8/16/32"]),
                enc("I", &["AL/AX/EAX/RAX (r)", "imm8/16/32"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("The comparison subtracts the second operand from the first and sets the flags the same way SUB does, but the result is discarded. CMP is normally followed by a conditional jump, a CMOVcc, or a SETcc.")
                .block(Block::code("cmp ecx, 10\njl  loop_top       ; signed less-than\ncmp eax, ebx\njb  below          ; unsigned below")),
        )
        .section(arithmetic_flags())
        .section(memory_exceptions(false))
        .cite(intel_sdm())
}

fn jmp() -> Page {
    instruction("JMP", "Unconditional jump")
        .section(Section::intro(
            "Transfers program control to a different point in the instruction stream without recording return information.",
        ))
        .section(encoding(
            vec![
                op("EB cb", "JMP rel8", "D", Valid, Valid, "Jump short, RIP = RIP + 8-bit displacement sign-extended to 64 bits."),
                op("E9 cd", "JMP rel32", "D", Valid, Valid, "Jump near, relative, RIP = RIP + 32-bit displacement sign-extended to 64 bits."),
                op("FF /4", "JMP r/m32", "M", NS, Valid, "Jump near, absolute indirect, address given in r/m32."),
                op("FF /4", "JMP r/m64", "M", Valid, NE, "Jump near, absolute indirect, RIP = 64-bit offset from register or memory."),
                op("EA cp", "JMP ptr16:32", "S", Invalid, Valid, "Jump far, absolute, address given in operand."),
                op("FF /5", "JMP m16:32", "M", Valid, Valid, "Jump far, absolute indirect, address given in m16:32."),
            ],
            vec![
                enc("S", &["NA"]),
                enc("D", &["Offset"]),
                enc("M", &["ModRM:r/m (r)"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("A near jump stays within the current code segment. A short jump is a near jump limited to -128 to +127 bytes from the next instruction. A far jump changes CS as well and, in protected mode, may go through a call gate or cause a task switch.")
                .prose("In 64-bit mode the operand size of near jumps is fixed at 64 bits and the direct far form EA is invalid."),
        )
        .section(
            Section::new("flags", "Flags Affected")
                .prose("All flags are affected if a task switch occurs; no flags are affected if a task switch does not occur."),
        )
        .section(
            Section::new("exceptions", "Exceptions").block(Block::exceptions(
                "Protected Mode",
                vec![
                    exc("#GP(0)", "If the offset in the target operand is beyond the code segment limit."),
                    exc("#GP(selector)", "If the segment selector in the destination operand, call gate, or task gate is NULL or references a descriptor that is not a code segment, call gate, task gate, or TSS."),
                    exc("#NP(selector)", "If the code segment being accessed is not present."),
                    exc("#PF(fault-code)", "If a page fault occurs."),
                    exc("#UD", "If the LOCK prefix is used."),
                ],
            )),
        )
        .cite(intel_sdm())
}

fn call() -> Page {
    instruction("CALL", "Call procedure")
        .section(Section::intro(
            "Saves procedure linking information on the stack and branches to the called procedure specified by the destination operand.",
        ))
        .section(encoding(
            vec![
                op("E8 cd", "CALL rel32", "D", Valid, Valid, "Call near, relative, displacement relative to next instruction."),
                op("FF /2", "CALL r/m32", "M", NE, Valid, "Call near, absolute indirect, address given in r/m32."),
                op("FF /2", "CALL r/m64", "M", Valid, NE, "Call near, absolute indirect, address given in r/m64."),
                op("9A cp", "CALL ptr16:32", "D", Invalid, Valid, "Call far, absolute, address given in operand."),
                op("FF /3", "CALL m16:32", "M", Valid, Valid, "Call far, absolute indirect, address given in m16:32."),
            ],
            vec![enc("D", &["Offset"]), enc("M", &["ModRM:r/m (r)"])],
        ))
        .section(
            Section::new("description", "Description")
                .prose("A near call pushes the offset of the next instruction (RIP, EIP, or IP) and then jumps to the target. A matching RET pops that value back. A far call also pushes CS.")
                .prose("In 64-bit mode the operand size of a near call is forced to 64 bits, so RSP always moves by 8.")
                .block(Block::code("call compute        ; push return address, jump\n...\ncompute:\n    ; ...\n    ret              ; pop return address")),
        )
        .section(
            Section::new("flags", "Flags Affected")
                .prose("All flags are affected if a task switch occurs; no flags are affected if a task switch does not occur."),
        )
        .section(
            Section::new("exceptions", "Exceptions").block(Block::exceptions(
                "64-Bit Mode",
                vec![
                    exc("#GP(0)", "If a memory address is non-canonical."),
                    exc("#GP(0)", "If the target offset is not in canonical form."),
                    exc("#SS(0)", "If pushing the return address exceeds the bounds of the stack segment or the stack address is non-canonical."),
                    exc("#PF(fault-code)", "If a page fault occurs."),
                    exc("#UD", "If the LOCK prefix is used."),
                ],
            )),
        )
        .cite(intel_sdm())
}

fn push() -> Page {
    instruction("PUSH", "Push word, doubleword, or quadword onto the stack")
        .section(Section::intro(
            "Decrements the stack pointer and then stores the source operand at the top of the stack.",
        ))
        .section(encoding(
            vec![
                op("FF /6", "PUSH r/m64", "M", Valid, NE, "Push r/m64."),
                op("FF /6", "PUSH r/m32", "M", NE, Valid, "Push r/m32."),
                op("50+rd", "PUSH r64", "O", Valid, NE, "Push r64."),
                op("50+rd", "PUSH r32", "O", NE, Valid, "Push r32."),
                op("6A ib", "PUSH imm8", "I", Valid, Valid, "Push imm8."),
                op("68 id", "PUSH imm32", "I", Valid, Valid, "Push imm32."),
                op("0E", "PUSH CS", "ZO", Invalid, Valid, "Push CS."),
                op("0F A0", "PUSH FS", "ZO", Valid, Valid, "Push FS."),
                op("0F A8", "PUSH GS", "ZO", Valid, Valid, "Push GS."),
            ],
            vec![
                enc("M", &["ModRM:r/m (r)"]),
                enc("O", &["opcode + rd (r)"]),
                enc("I", &["imm8/16/32"]),
                enc("ZO", &["NA"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("The stack pointer is decremented by the operand size (2, 4, or 8 bytes) before the store. If the source operand is an immediate smaller than the operand size, it is sign-extended.")
                .prose("PUSH ESP and PUSH RSP push the value the register had before the instruction executed."),
        )
        .section(no_flags())
        .section(memory_exceptions(false))
        .cite(intel_sdm())
}

fn pop() -> Page {
    instruction("POP", "Pop a value from the stack")
        .section(Section::intro(
            "Loads the value from the top of the stack to the destination operand and then increments the stack pointer.",
        ))
        .section(encoding(
            vec![
                op("8F /0", "POP r/m64", "M", Valid, NE, "Pop top of stack into m64; increment stack pointer."),
                op("8F /0", "POP r/m32", "M", NE, Valid, "Pop top of stack into m32; increment stack pointer."),
                op("58+ rd", "POP r64", "O", Valid, NE, "Pop top of stack into r64; increment stack pointer."),
                op("58+ rd", "POP r32", "O", NE, Valid, "Pop top of stack into r32; increment stack pointer."),
                op("1F", "POP DS", "ZO", Invalid, Valid, "Pop top of stack into DS; increment stack pointer."),
                op("0F A1", "POP FS", "ZO", Valid, Valid, "Pop top of stack into FS; increment stack pointer."),
                op("0F A9", "POP GS", "ZO", Valid, Valid, "Pop top of stack into GS; increment stack pointer."),
            ],
            vec![
                enc("M", &["ModRM:r/m (w)"]),
                enc("O", &["opcode + rd (w)"]),
                enc("ZO", &["NA"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("POP CS is not a valid instruction; RET or a far jump is used to load CS. Loading SS with POP inhibits interrupts until after the next instruction.")
                .prose("If the destination addresses memory through ESP or RSP, the address is computed after the stack pointer has been incremented."),
        )
        .section(no_flags())
        .section(memory_exceptions(true))
        .cite(intel_sdm())
}

fn lea() -> Page {
    instruction("LEA", "Load effective address")
        .section(Section::intro(
            "Computes the effective address of the second operand (the source) and stores it in the first operand (the destination).",
        ))
        .section(encoding(
            vec![
                op("8D /r", "LEA r16, m", "RM", Valid, Valid, "Store effective address for m in r16."),
                op("8D /r", "LEA r32, m", "RM", Valid, Valid, "Store effective address for m in r32."),
                op("REX.W + 8D /r", "LEA r64, m", "RM", Valid, NE, "Store effective address for m in r64."),
            ],
            vec![enc("RM", &["ModRM:reg (w)", "ModRM:r/m (r)"])],
        ))
        .section(
            Section::new("description", "Description")
                .prose("The source is a memory address built from base, index, scale, and displacement; memory is not accessed. The result is truncated or zero-extended to the destination size.")
                .prose("Because it performs shifted addition without touching the flags, LEA is often used for arithmetic.")
                .block(Block::code("lea rax, [rbx + rcx*4 + 8]\nlea rsi, [rip + message]   ; RIP-relative address")),
        )
        .section(no_flags())
        .section(Section::new("exceptions", "Exceptions").block(Block::exceptions(
            "All Modes",
            vec![exc("#UD", "If the source operand is not a memory location, or if the LOCK prefix is used.")],
        )))
        .cite(intel_sdm())
}

fn xchg() -> Page {
    instruction("XCHG", "Exchange register/memory with register")
        .section(Section::intro("Exchanges the contents of the destination and source operands."))
        .section(encoding(
            vec![
                op("90+rd", "XCHG EAX, r32", "O", Valid, Valid, "Exchange r32 with EAX."),
                op("REX.W + 90+rd", "XCHG RAX, r64", "O", Valid, NE, "Exchange r64 with RAX."),
                op("86 /r", "XCHG r/m8, r8", "MR", Valid, Valid, "Exchange r8 with byte from r/m8."),
                op("87 /r", "XCHG r/m32, r32", "MR", Valid, Valid, "Exchange r32 with doubleword from r/m32."),
                op("REX.W + 87 /r", "XCHG r/m64, r64", "MR", Valid, NE, "Exchange r64 with quadword from r/m64."),
            ],
            vec![
                enc("O", &["AX/EAX/RAX (r, w)", "opcode + rd (r, w)"]),
                enc("MR", &["ModRM:r/m (r, w)", "ModRM:reg (r, w)"]),
            ],
        ))
        .section(
            Section::new("description", "Description")
                .prose("When a memory operand is referenced the processor's locking protocol is applied automatically for the duration of the exchange, whether or not a LOCK prefix is present.")
                .prose("XCHG EAX, EAX (90) is the NOP encoding. In 64-bit mode it does not zero-extend RAX."),
        )
        .section(no_flags())
        .section(memory_exceptions(true))
        .cite(intel_sdm())
}

fn nop() -> Page {
    instruction("NOP", "No operation")
        .section(Section::intro(
            "Performs no operation. The instruction takes up space in the instruction stream but does not affect machine state except RIP.",
        ))
        .section(encoding(
            vec![
                op("NP 90", "NOP", "ZO", Valid, Valid, "One byte no-operation instruction."),
                op("NP 0F 1F /0", "NOP r/m16", "M", Valid, Valid, "Multi-byte no-operation instruction."),
                op("NP 0F 1F /0", "NOP r/m32", "M", Valid, Valid, "Multi-byte no-operation instruction."),
            ],
            vec![enc("ZO", &["NA"]), enc("M", &["ModRM:r/m (r)"])],
        ))
        .section(
            Section::new("description", "Description")
                .prose("The one-byte form is an alias of XCHG EAX, EAX. The multi-byte form 0F 1F takes a ModRM operand so padding of two to nine bytes can be emitted as a single instruction.")
                .block(Block::List {
                    items: vec![
                        "2 bytes: 66 90".to_string(),
                        "3 bytes: 0F 1F 00".to_string(),
                        "4 bytes: 0F 1F 40 00".to_string(),
                        "5 bytes: 0F 1F 44 00 00".to_string(),
                        "6 bytes: 66 0F 1F 44 00 00".to_string(),
                        "7 bytes: 0F 1F 80 00 00 00 00".to_string(),
                        "8 bytes: 0F 1F 84 00 00 00 00 00".to_string(),
                        "9 bytes: 66 0F 1F 84 00 00 00 00 00".to_string(),
                    ],
                }),
        )
        .section(no_flags())
        .section(lock_only_exceptions())
        .cite(intel_sdm())
}

fn cpuid() -> Page {
    instruction("CPUID", "CPU identification")
        .section(Section::intro(
            "Returns processor identification and feature information in EAX, EBX, ECX, and EDX. The information returned is selected by the value in EAX, and for some leaves also ECX, on entry.",
        ))
        .section(encoding(
            vec![op(
                "0F A2",
                "CPUID",
                "ZO",
                Valid,
                Valid,
                "Returns processor identification and feature information to the EAX, EBX, ECX, and EDX registers, as determined by input entered in EAX (and, in some cases, ECX).",
            )],
            vec![enc("ZO", &["NA"])],
        ))
        .section(
            Section::new("leaves", "Common Leaves")
                .block(Block::list(&[
                    "EAX = 0: highest basic leaf in EAX; vendor string in EBX, EDX, ECX (\"GenuineIntel\", \"AuthenticAMD\").",
                    "EAX = 1: version information in EAX; feature flags in ECX and EDX.",
                    "EAX = 7, ECX = 0: structured extended feature flags in EBX, ECX, EDX.",
                    "EAX = 80000000h: highest extended leaf.",
                    "EAX = 80000001h: extended feature flags; EDX bit 29 reports long mode (LM).",
                    "EAX = 80000002h to 80000004h: processor brand string.",
                ]))
                .subsection(
                    Section::new("version-information", "Version Information (Leaf 1, EAX)")
                        .block(Block::bitfield(
                            32,
                            vec![
                                BitField::range("Ext Family", 27, 20),
                                BitField::range("Ext Model", 19, 16),
                                BitField::range("Type", 13, 12),
                                BitField::range("Family", 11, 8),
                                BitField::range("Model", 7, 4),
                                BitField::range("Stepping", 3, 0),
                            ],
                        ))
                        .prose("When Family is 0Fh the displayed family is Family + Ext Family. When Family is 06h or 0Fh the displayed model is (Ext Model << 4) + Model."),
                ),
        )
        .section(
            Section::new("description", "Description")
                .prose("CPUID is a serializing instruction: all prior instructions complete before it executes. Software should check the highest supported leaf before querying a leaf.")
                .block(Block::code("xor eax, eax\ncpuid              ; EAX = highest leaf, EBX:EDX:ECX = vendor")),
        )
        .section(no_flags())
        .section(lock_only_exceptions())
        .cite(intel_sdm())
        .cite(amd_apm())
}
