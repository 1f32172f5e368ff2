//! Architecture history pages

use crate::page::{Block, Citation, Page, PageKind, Section};

use super::amd_apm;

pub fn pages() -> Vec<Page> {
    vec![i8086(), i80386(), amd64()]
}

fn history(slug: &str, title: &str, summary: &str) -> Page {
    Page::new(&format!("/history/{}", slug), title, PageKind::History).summary(summary)
}

fn i8086() -> Page {
    history("8086", "Intel 8086", "1978: the first x86 processor")
        .section(Section::intro(
            "Intel introduced the 8086 in 1978. Its instruction set, register names, and segmented memory model are the base that every later x86 processor still executes.",
        ))
        .section(
            Section::new("architecture", "Architecture").block(Block::list(&[
                "16-bit registers: AX, BX, CX, DX, SI, DI, BP, SP.",
                "20-bit physical address, 1 MiB of memory, formed as segment * 16 + offset.",
                "Four segment registers: CS, DS, SS, ES.",
                "About 29,000 transistors.",
            ])),
        )
        .section(
            Section::new("legacy", "Legacy")
                .prose("The 8088, an 8086 with an 8-bit external bus, was chosen for the IBM PC in 1981. That choice made the x86 instruction set the standard for personal computers, and real-address mode still starts every x86 processor today."),
        )
        .cite(
            Citation::new("The 8086 Family User's Manual")
                .author("Intel Corporation")
                .publisher("Intel")
                .year(1979),
        )
}

fn i80386() -> Page {
    history("80386", "Intel 80386", "1985: 32-bit protected mode and paging")
        .section(Section::intro(
            "The 80386 extended x86 to 32 bits. It is the origin of the IA-32 architecture that operating systems targeted for the next two decades.",
        ))
        .section(
            Section::new("architecture", "Architecture").block(Block::list(&[
                "32-bit registers (EAX, EBX, ...) and a 4 GiB flat address space.",
                "Paging with 4 KiB pages, enabled by CR0.PG.",
                "Virtual-8086 mode for running real-mode programs under a protected-mode OS.",
                "FS and GS segment registers.",
                "About 275,000 transistors.",
            ])),
        )
        .section(
            Section::new("legacy", "Legacy")
                .prose("Flat 32-bit protected mode with paging became the model used by Windows NT, Linux, and the BSDs. Later processors added instructions but kept the 80386 system architecture."),
        )
        .cite(
            Citation::new("Intel 80386 Programmer's Reference Manual")
                .author("Intel Corporation")
                .publisher("Intel")
                .year(1986),
        )
}

fn amd64() -> Page {
    history("amd64", "AMD64", "2003: the 64-bit extension of x86")
        .section(Section::intro(
            "AMD published the x86-64 specification in 2000 and shipped the first implementation, Opteron, in April 2003. Intel adopted the same architecture in 2004, first as EM64T and later as Intel 64.",
        ))
        .section(
            Section::new("architecture", "Architecture").block(Block::list(&[
                "Long mode, made of 64-bit mode and compatibility mode.",
                "Sixteen 64-bit general-purpose registers, R8 to R15 reached through REX.",
                "RIP-relative addressing.",
                "Sixteen XMM registers; SSE2 is part of the baseline.",
                "48-bit canonical virtual addresses with four-level paging.",
            ])),
        )
        .section(
            Section::new("removed", "Removed in 64-Bit Mode")
                .prose("Several legacy features are invalid in 64-bit mode: virtual-8086 mode, PUSHA/POPA, the BCD adjust instructions, BOUND, and the one-byte INC/DEC encodings, which became the REX prefix."),
        )
        .cite(amd_apm())
}
